// src/repositories/country_repository.rs
//
// Country persistence

use rusqlite::{params, Row};

use crate::db::SharedConnection;
use crate::domain::{Country, RecordMeta};
use crate::error::{AppError, AppResult};

use super::cache::CacheSettings;
use super::record_store::RecordStore;
use super::repository::Repository;
use super::rows::{like_pattern, timestamp, to_column};

pub type CountryRepository = Repository<Country, SqliteCountryStore>;

const SELECT_COUNTRY: &str = "SELECT country_id, country, last_update FROM country";

pub struct SqliteCountryStore {
    conn: SharedConnection,
}

impl SqliteCountryStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_country(row: &Row) -> Result<Country, rusqlite::Error> {
        let last_update = timestamp(row, "last_update")?;

        Ok(Country {
            meta: RecordMeta::loaded(row.get("country_id")?, last_update, last_update, true),
            name: row.get("country")?,
        })
    }
}

impl RecordStore<Country> for SqliteCountryStore {
    fn insert(&self, country: &Country) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO country (country, last_update) VALUES (?1, ?2)",
            params![country.name, to_column(&country.meta.updated_at)],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, country: &Country) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE country SET country = ?2, last_update = ?3 WHERE country_id = ?1",
            params![
                country.meta.id,
                country.name,
                to_column(&country.meta.updated_at)
            ],
        )?;

        Ok(rows > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM country WHERE country_id = ?1", params![id])?;

        Ok(rows > 0)
    }

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<Country>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE country_id = ?1", SELECT_COUNTRY))?;

        match stmt.query_row(params![id], Self::row_to_country) {
            Ok(country) => Ok(Some(country)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn fetch_all(&self) -> AppResult<Vec<Country>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY country", SELECT_COUNTRY))?;

        let countries = stmt
            .query_map([], Self::row_to_country)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(countries)
    }

    fn search(&self, term: &str) -> AppResult<Vec<Country>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE LOWER(country) LIKE ?1 ESCAPE '\\' ORDER BY country",
            SELECT_COUNTRY
        ))?;

        let countries = stmt
            .query_map(params![like_pattern(term)], Self::row_to_country)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(countries)
    }
}

impl Repository<Country, SqliteCountryStore> {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self::with_cache(SqliteCountryStore::new(conn), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_country_crud() {
        let db = Database::open_in_memory().unwrap();
        let mut repo = CountryRepository::sqlite(db.connection(), CacheSettings::default());

        let mut country = Country::new("Portugal");
        assert!(repo.create(&mut country));

        country.name = "Portuguese Republic".into();
        assert!(repo.update(&mut country));
        assert_eq!(repo.search(&["republic"]).len(), 1);

        assert!(repo.delete(country.meta.id));
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let mut repo = CountryRepository::sqlite(db.connection(), CacheSettings::default());

        let mut country = Country::new("   ");
        assert!(!repo.create(&mut country));
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_country_in_use_cannot_be_deleted() {
        let db = Database::open_in_memory().unwrap();
        crate::db::seed_demo_data(&db.connection()).unwrap();
        let mut repo = CountryRepository::sqlite(db.connection(), CacheSettings::default());

        assert!(!repo.delete(1));
        assert!(repo.get_by_id(1).is_some());
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let db = Database::open_in_memory().unwrap();
        crate::db::seed_demo_data(&db.connection()).unwrap();
        let mut repo = CountryRepository::sqlite(db.connection(), CacheSettings::default());

        let names: Vec<String> = repo.get_all().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Australia", "Canada", "Japan"]);
    }
}
