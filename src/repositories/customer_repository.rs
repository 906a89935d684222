// src/repositories/customer_repository.rs
//
// Customer persistence
//
// Customers are never removed: delete clears the active column. Rows are
// loaded joined with the street line of their address.

use log::error;
use rusqlite::{params, Row};
use serde::Serialize;

use crate::db::SharedConnection;
use crate::domain::{Address, Customer, RecordMeta, Store};
use crate::error::{AppError, AppResult};

use super::cache::CacheSettings;
use super::record_store::RecordStore;
use super::repository::Repository;
use super::rows::{like_pattern, timestamp, to_column};

pub type CustomerRepository = Repository<Customer, SqliteCustomerStore>;

const SELECT_CUSTOMER: &str = "SELECT c.customer_id, c.store_id, c.first_name, c.last_name,
            c.email, c.address_id, c.active, c.create_date, c.last_update, a.address
     FROM customer c
     JOIN address a ON a.address_id = c.address_id";

/// One rental in a customer's history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRental {
    pub rental_id: i64,
    pub rental_date: String,
    pub return_date: Option<String>,
    pub film_title: String,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerStatistics {
    pub total_customers: i64,
    pub active_customers: i64,
    pub inactive_customers: i64,
    /// (store id, customer count), ordered by store
    pub by_store: Vec<(i64, i64)>,
}

pub struct SqliteCustomerStore {
    conn: SharedConnection,
}

impl SqliteCustomerStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_customer(row: &Row) -> Result<Customer, rusqlite::Error> {
        let created_at = timestamp(row, "create_date")?;
        let updated_at = timestamp(row, "last_update")?;
        let active: bool = row.get("active")?;

        Ok(Customer {
            meta: RecordMeta::loaded(row.get("customer_id")?, created_at, updated_at, active),
            store: Store::reference(row.get("store_id")?),
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            address: Address::reference(
                row.get("address_id")?,
                row.get::<_, String>("address")?,
            ),
        })
    }

    /// Rentals newest first, with the payment taken for each
    pub fn rentals_of_customer(&self, customer_id: i64) -> AppResult<Vec<CustomerRental>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.rental_id, r.rental_date, r.return_date, f.title AS film_title,
                    SUM(p.amount) AS amount
             FROM rental r
             JOIN inventory i ON i.inventory_id = r.inventory_id
             JOIN film f ON f.film_id = i.film_id
             LEFT JOIN payment p ON p.rental_id = r.rental_id
             WHERE r.customer_id = ?1
             GROUP BY r.rental_id, r.rental_date, r.return_date, f.title
             ORDER BY r.rental_date DESC",
        )?;

        let rentals = stmt
            .query_map(params![customer_id], |row| {
                Ok(CustomerRental {
                    rental_id: row.get("rental_id")?,
                    rental_date: row.get("rental_date")?,
                    return_date: row.get("return_date")?,
                    film_title: row.get("film_title")?,
                    amount: row.get("amount")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rentals)
    }

    pub fn statistics(&self) -> AppResult<CustomerStatistics> {
        let (total_customers, active_customers): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(active), 0) FROM customer",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT store_id, COUNT(*) FROM customer GROUP BY store_id ORDER BY store_id",
        )?;

        let by_store = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CustomerStatistics {
            total_customers,
            active_customers,
            inactive_customers: total_customers - active_customers,
            by_store,
        })
    }
}

impl RecordStore<Customer> for SqliteCustomerStore {
    fn insert(&self, customer: &Customer) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO customer (
                store_id, first_name, last_name, email, address_id, active,
                create_date, last_update
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                customer.store.meta.id,
                customer.first_name,
                customer.last_name,
                customer.email,
                customer.address.meta.id,
                customer.meta.active,
                to_column(&customer.meta.created_at),
                to_column(&customer.meta.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, customer: &Customer) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE customer SET
                store_id = ?2, first_name = ?3, last_name = ?4, email = ?5,
                address_id = ?6, active = ?7, last_update = ?8
             WHERE customer_id = ?1",
            params![
                customer.meta.id,
                customer.store.meta.id,
                customer.first_name,
                customer.last_name,
                customer.email,
                customer.address.meta.id,
                customer.meta.active,
                to_column(&customer.meta.updated_at),
            ],
        )?;

        Ok(rows > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE customer SET active = 0, last_update = ?2 WHERE customer_id = ?1",
            params![id, to_column(&chrono::Utc::now())],
        )?;

        Ok(rows > 0)
    }

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE c.customer_id = ?1", SELECT_CUSTOMER))?;

        match stmt.query_row(params![id], Self::row_to_customer) {
            Ok(customer) => Ok(Some(customer)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn fetch_all(&self) -> AppResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY c.customer_id", SELECT_CUSTOMER))?;

        let customers = stmt
            .query_map([], Self::row_to_customer)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(customers)
    }

    fn search(&self, term: &str) -> AppResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE LOWER(c.first_name) LIKE ?1 ESCAPE '\\'
                OR LOWER(c.last_name) LIKE ?1 ESCAPE '\\'
                OR LOWER(c.email) LIKE ?1 ESCAPE '\\'
             ORDER BY c.customer_id",
            SELECT_CUSTOMER
        ))?;

        let customers = stmt
            .query_map(params![like_pattern(term)], Self::row_to_customer)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(customers)
    }
}

impl Repository<Customer, SqliteCustomerStore> {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self::with_cache(SqliteCustomerStore::new(conn), settings)
    }

    /// Rental history of a customer. Empty on failure.
    pub fn rentals_of_customer(&self, customer_id: i64) -> Vec<CustomerRental> {
        if customer_id <= 0 {
            error!("Invalid customer id {}", customer_id);
            return Vec::new();
        }
        self.store()
            .rentals_of_customer(customer_id)
            .unwrap_or_else(|err| {
                error!("Failed to load rentals of customer {}: {}", customer_id, err);
                Vec::new()
            })
    }

    pub fn statistics(&self) -> CustomerStatistics {
        self.store().statistics().unwrap_or_else(|err| {
            error!("Failed to compute customer statistics: {}", err);
            CustomerStatistics::default()
        })
    }
}
