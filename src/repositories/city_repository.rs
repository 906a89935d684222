// src/repositories/city_repository.rs
//
// City persistence
//
// Cities are loaded joined with their country name.

use log::error;
use rusqlite::{params, Row};
use serde::Serialize;

use crate::db::SharedConnection;
use crate::domain::{City, Country, RecordMeta};
use crate::error::{AppError, AppResult};

use super::cache::CacheSettings;
use super::record_store::RecordStore;
use super::repository::Repository;
use super::rows::{like_pattern, timestamp, to_column};

pub type CityRepository = Repository<City, SqliteCityStore>;

const SELECT_CITY: &str = "SELECT c.city_id, c.city, c.country_id, c.last_update, co.country
     FROM city c
     JOIN country co ON co.country_id = c.country_id";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCityCount {
    pub country: String,
    pub city_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CityStatistics {
    pub total_cities: i64,
    pub by_country: Vec<CountryCityCount>,
}

pub struct SqliteCityStore {
    conn: SharedConnection,
}

impl SqliteCityStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_city(row: &Row) -> Result<City, rusqlite::Error> {
        let last_update = timestamp(row, "last_update")?;

        Ok(City {
            meta: RecordMeta::loaded(row.get("city_id")?, last_update, last_update, true),
            name: row.get("city")?,
            country: Country::reference(row.get("country_id")?, row.get::<_, String>("country")?),
        })
    }

    pub fn fetch_by_country(&self, country_id: i64) -> AppResult<Vec<City>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE c.country_id = ?1 ORDER BY c.city",
            SELECT_CITY
        ))?;

        let cities = stmt
            .query_map(params![country_id], Self::row_to_city)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cities)
    }

    pub fn statistics(&self) -> AppResult<CityStatistics> {
        let total_cities: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM city", [], |row| row.get(0))?;

        let mut stmt = self.conn.prepare(
            "SELECT co.country, COUNT(c.city_id) AS city_count
             FROM country co
             JOIN city c ON c.country_id = co.country_id
             GROUP BY co.country_id, co.country
             ORDER BY city_count DESC, co.country",
        )?;

        let by_country = stmt
            .query_map([], |row| {
                Ok(CountryCityCount {
                    country: row.get("country")?,
                    city_count: row.get("city_count")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CityStatistics {
            total_cities,
            by_country,
        })
    }
}

impl RecordStore<City> for SqliteCityStore {
    fn insert(&self, city: &City) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO city (city, country_id, last_update) VALUES (?1, ?2, ?3)",
            params![
                city.name,
                city.country.meta.id,
                to_column(&city.meta.updated_at)
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, city: &City) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE city SET city = ?2, country_id = ?3, last_update = ?4 WHERE city_id = ?1",
            params![
                city.meta.id,
                city.name,
                city.country.meta.id,
                to_column(&city.meta.updated_at)
            ],
        )?;

        Ok(rows > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM city WHERE city_id = ?1", params![id])?;

        Ok(rows > 0)
    }

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<City>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE c.city_id = ?1", SELECT_CITY))?;

        match stmt.query_row(params![id], Self::row_to_city) {
            Ok(city) => Ok(Some(city)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn fetch_all(&self) -> AppResult<Vec<City>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY c.city", SELECT_CITY))?;

        let cities = stmt
            .query_map([], Self::row_to_city)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cities)
    }

    fn search(&self, term: &str) -> AppResult<Vec<City>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE LOWER(c.city) LIKE ?1 ESCAPE '\\'
                OR LOWER(co.country) LIKE ?1 ESCAPE '\\'
             ORDER BY c.city",
            SELECT_CITY
        ))?;

        let cities = stmt
            .query_map(params![like_pattern(term)], Self::row_to_city)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cities)
    }
}

impl Repository<City, SqliteCityStore> {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self::with_cache(SqliteCityStore::new(conn), settings)
    }

    /// Cities of one country, from the cache when any are cached
    pub fn cities_by_country(&mut self, country_id: i64) -> Vec<City> {
        if country_id <= 0 {
            error!("Invalid country id {}", country_id);
            return Vec::new();
        }

        self.find_cached_or(
            |city| city.country.meta.id == country_id,
            |store| store.fetch_by_country(country_id),
        )
    }

    pub fn statistics(&self) -> CityStatistics {
        self.store().statistics().unwrap_or_else(|err| {
            error!("Failed to compute city statistics: {}", err);
            CityStatistics::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        crate::db::seed_demo_data(&db.connection()).unwrap();
        db
    }

    #[test]
    fn test_unknown_country_is_rejected_by_store() {
        let db = seeded();
        let mut repo = CityRepository::sqlite(db.connection(), CacheSettings::default());

        let mut city = City::new("Atlantis", Country::reference(999, "Nowhere"));
        assert!(!repo.create(&mut city));
        assert_eq!(city.meta.id, 0);
        assert!(repo.cache().is_empty());
    }

    #[test]
    fn test_missing_country_fails_validation() {
        let db = seeded();
        let mut repo = CityRepository::sqlite(db.connection(), CacheSettings::default());

        let mut city = City::new("Atlantis", Country::default());
        assert!(!repo.create(&mut city));
    }

    #[test]
    fn test_city_carries_country_name() {
        let db = seeded();
        let mut repo = CityRepository::sqlite(db.connection(), CacheSettings::default());

        let tokyo = repo.get_by_id(3).unwrap();
        assert_eq!(tokyo.name, "Tokyo");
        assert_eq!(tokyo.country.name, "Japan");
    }

    #[test]
    fn test_cities_by_country() {
        let db = seeded();
        let mut repo = CityRepository::sqlite(db.connection(), CacheSettings::default());

        let names: Vec<String> = repo
            .cities_by_country(1)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Calgary", "Lethbridge"]);
        assert_eq!(repo.cache().len(), 2);

        assert!(repo.cities_by_country(0).is_empty());
    }

    #[test]
    fn test_search_matches_country_name() {
        let db = seeded();
        let mut repo = CityRepository::sqlite(db.connection(), CacheSettings::default());

        let found = repo.search(&["austral"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Woodridge");
    }

    #[test]
    fn test_statistics() {
        let db = seeded();
        let repo = CityRepository::sqlite(db.connection(), CacheSettings::default());

        let stats = repo.statistics();
        assert_eq!(stats.total_cities, 4);
        assert_eq!(stats.by_country[0].country, "Canada");
        assert_eq!(stats.by_country[0].city_count, 2);
    }
}
