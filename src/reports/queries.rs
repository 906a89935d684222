// src/reports/queries.rs
//
// Catalog of fixed reporting queries
//
// Money columns are rounded to cents in SQL so exported values stay stable.

use log::info;
use rusqlite::{params, Connection};

use super::QueryResult;
use crate::error::AppResult;

/// Every report the console can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    TopRentedFilms,
    TopCustomers,
    RevenueByCategory,
    /// Filmography of one actor
    FilmsByActor(i64),
    CustomersByCountry,
    FilmsByCategory,
    RevenueByMonth,
    InventoryByStore,
}

impl Report {
    /// Export reports, in menu order
    pub const REPORTS: [Report; 4] = [
        Report::FilmsByCategory,
        Report::CustomersByCountry,
        Report::RevenueByMonth,
        Report::InventoryByStore,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Report::TopRentedFilms => "Top 5 rented films",
            Report::TopCustomers => "Top 5 customers by rentals",
            Report::RevenueByCategory => "Revenue by category",
            Report::FilmsByActor(_) => "Films by actor",
            Report::CustomersByCountry => "Customers by country",
            Report::FilmsByCategory => "Films by category",
            Report::RevenueByMonth => "Revenue by month",
            Report::InventoryByStore => "Inventory by store",
        }
    }

    /// Base of the export file name
    pub fn file_base(&self) -> &'static str {
        match self {
            Report::TopRentedFilms => "top_rented_films",
            Report::TopCustomers => "top_customers",
            Report::RevenueByCategory => "revenue_by_category",
            Report::FilmsByActor(_) => "films_by_actor",
            Report::CustomersByCountry => "customers_by_country",
            Report::FilmsByCategory => "films_by_category",
            Report::RevenueByMonth => "revenue_by_month",
            Report::InventoryByStore => "inventory_by_store",
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            Report::TopRentedFilms => {
                "SELECT f.film_id, f.title, COUNT(r.rental_id) AS total_rentals
                 FROM film f
                 JOIN inventory i ON i.film_id = f.film_id
                 JOIN rental r ON r.inventory_id = i.inventory_id
                 GROUP BY f.film_id, f.title
                 ORDER BY total_rentals DESC, f.film_id
                 LIMIT 5"
            }
            Report::TopCustomers => {
                "SELECT c.customer_id, c.first_name, c.last_name, COUNT(r.rental_id) AS total_rentals
                 FROM customer c
                 JOIN rental r ON r.customer_id = c.customer_id
                 GROUP BY c.customer_id, c.first_name, c.last_name
                 ORDER BY total_rentals DESC, c.customer_id
                 LIMIT 5"
            }
            Report::RevenueByCategory => {
                "SELECT c.name AS category, ROUND(SUM(p.amount), 2) AS total_revenue
                 FROM category c
                 JOIN film_category fc ON fc.category_id = c.category_id
                 JOIN inventory i ON i.film_id = fc.film_id
                 JOIN rental r ON r.inventory_id = i.inventory_id
                 JOIN payment p ON p.rental_id = r.rental_id
                 GROUP BY c.name
                 ORDER BY total_revenue DESC, c.name"
            }
            Report::FilmsByActor(_) => {
                "SELECT a.actor_id, a.first_name, a.last_name, f.film_id, f.title, f.release_year
                 FROM actor a
                 JOIN film_actor fa ON fa.actor_id = a.actor_id
                 JOIN film f ON f.film_id = fa.film_id
                 WHERE a.actor_id = ?1
                 ORDER BY f.release_year DESC, f.title"
            }
            Report::CustomersByCountry => {
                "SELECT co.country, COUNT(cu.customer_id) AS total
                 FROM customer cu
                 JOIN address a ON a.address_id = cu.address_id
                 JOIN city ci ON ci.city_id = a.city_id
                 JOIN country co ON co.country_id = ci.country_id
                 GROUP BY co.country
                 ORDER BY total DESC, co.country"
            }
            Report::FilmsByCategory => {
                "SELECT c.name, COUNT(fc.film_id) AS total
                 FROM category c
                 JOIN film_category fc ON fc.category_id = c.category_id
                 GROUP BY c.name
                 ORDER BY total DESC, c.name"
            }
            Report::RevenueByMonth => {
                "SELECT CAST(strftime('%Y', p.payment_date) AS INTEGER) AS year,
                        CAST(strftime('%m', p.payment_date) AS INTEGER) AS month,
                        ROUND(SUM(p.amount), 2) AS total_revenue
                 FROM payment p
                 GROUP BY year, month
                 ORDER BY year, month"
            }
            Report::InventoryByStore => {
                "SELECT s.store_id, COUNT(i.inventory_id) AS total_inventory,
                        COUNT(DISTINCT i.film_id) AS unique_films
                 FROM store s
                 JOIN inventory i ON i.store_id = s.store_id
                 GROUP BY s.store_id
                 ORDER BY s.store_id"
            }
        }
    }

    pub fn run(&self, conn: &Connection) -> AppResult<QueryResult> {
        let mut stmt = conn.prepare(self.sql())?;

        let result = match self {
            Report::FilmsByActor(actor_id) => {
                QueryResult::from_statement(&mut stmt, params![actor_id])?
            }
            _ => QueryResult::from_statement(&mut stmt, [])?,
        };

        info!("Report '{}' returned {} rows", self.title(), result.rows.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_demo_data, Database};

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        seed_demo_data(&db.connection()).unwrap();
        db
    }

    #[test]
    fn test_top_rented_films() {
        let db = seeded();
        let result = Report::TopRentedFilms.run(&db.connection()).unwrap();

        assert_eq!(result.columns, vec!["film_id", "title", "total_rentals"]);
        assert_eq!(result.value(0, "title"), Some("ACADEMY DINOSAUR"));
        assert_eq!(result.value(0, "total_rentals"), Some("3"));
        assert_eq!(result.rows.len(), 3);
    }

    #[test]
    fn test_top_customers() {
        let db = seeded();
        let result = Report::TopCustomers.run(&db.connection()).unwrap();

        assert_eq!(result.value(0, "first_name"), Some("MARY"));
        assert_eq!(result.value(0, "total_rentals"), Some("3"));
    }

    #[test]
    fn test_revenue_by_category() {
        let db = seeded();
        let result = Report::RevenueByCategory.run(&db.connection()).unwrap();

        assert_eq!(result.value(0, "category"), Some("Documentary"));
        assert_eq!(result.value(0, "total_revenue"), Some("8.97"));
        assert_eq!(result.value(1, "category"), Some("Action"));
        assert_eq!(result.value(1, "total_revenue"), Some("6.98"));
    }

    #[test]
    fn test_films_by_actor() {
        let db = seeded();
        let result = Report::FilmsByActor(4).run(&db.connection()).unwrap();

        let titles: Vec<&str> = (0..result.rows.len())
            .filter_map(|i| result.value(i, "title"))
            .collect();
        assert_eq!(titles, vec!["ACADEMY DINOSAUR", "ACE GOLDFINGER", "ADAPTATION HOLES"]);

        let nobody = Report::FilmsByActor(999).run(&db.connection()).unwrap();
        assert!(nobody.is_empty());
    }

    #[test]
    fn test_customers_by_country() {
        let db = seeded();
        let result = Report::CustomersByCountry.run(&db.connection()).unwrap();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.value(0, "country"), Some("Canada"));
        assert_eq!(result.value(0, "total"), Some("2"));
        assert_eq!(result.value(1, "country"), Some("Japan"));
    }

    #[test]
    fn test_films_by_category() {
        let db = seeded();
        let result = Report::FilmsByCategory.run(&db.connection()).unwrap();

        assert_eq!(result.value(0, "name"), Some("Action"));
        assert_eq!(result.value(0, "total"), Some("2"));
        assert_eq!(result.rows.len(), 3);
    }

    #[test]
    fn test_revenue_by_month() {
        let db = seeded();
        let result = Report::RevenueByMonth.run(&db.connection()).unwrap();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.value(0, "year"), Some("2005"));
        assert_eq!(result.value(0, "month"), Some("5"));
        assert_eq!(result.value(0, "total_revenue"), Some("3.98"));
        assert_eq!(result.value(1, "month"), Some("6"));
        assert_eq!(result.value(1, "total_revenue"), Some("11.97"));
    }

    #[test]
    fn test_inventory_by_store() {
        let db = seeded();
        let result = Report::InventoryByStore.run(&db.connection()).unwrap();

        assert_eq!(result.value(0, "total_inventory"), Some("3"));
        assert_eq!(result.value(0, "unique_films"), Some("2"));
        assert_eq!(result.value(1, "total_inventory"), Some("3"));
        assert_eq!(result.value(1, "unique_films"), Some("3"));
    }

    #[test]
    fn test_empty_database_yields_empty_results() {
        let db = Database::open_in_memory().unwrap();
        for report in Report::REPORTS {
            assert!(report.run(&db.connection()).unwrap().is_empty());
        }
    }
}
