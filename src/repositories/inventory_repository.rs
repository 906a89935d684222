// src/repositories/inventory_repository.rs
//
// Inventory persistence
//
// Each copy is loaded with its full film row. Bulk loads are capped since
// the inventory table is the largest the console lists.

use log::error;
use rusqlite::{params, Row};

use crate::db::SharedConnection;
use crate::domain::{Inventory, RecordMeta, Store};
use crate::error::{AppError, AppResult};

use super::cache::CacheSettings;
use super::film_repository::{SqliteFilmStore, FILM_COLUMNS, FILM_JOINS};
use super::record_store::RecordStore;
use super::repository::Repository;
use super::rows::{like_pattern, timestamp, to_column};

pub type InventoryRepository = Repository<Inventory, SqliteInventoryStore>;

/// Maximum copies returned by a bulk load
pub const INVENTORY_LOAD_LIMIT: i64 = 100;

pub struct SqliteInventoryStore {
    conn: SharedConnection,
}

impl SqliteInventoryStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT i.inventory_id, i.store_id, i.last_update AS inventory_last_update, {}
             FROM inventory i
             JOIN film f ON f.film_id = i.film_id
             {} {}",
            FILM_COLUMNS, FILM_JOINS, filter
        )
    }

    fn row_to_inventory(row: &Row) -> Result<Inventory, rusqlite::Error> {
        let last_update = timestamp(row, "inventory_last_update")?;

        Ok(Inventory {
            meta: RecordMeta::loaded(row.get("inventory_id")?, last_update, last_update, true),
            film: SqliteFilmStore::row_to_film(row)?,
            store: Store::reference(row.get("store_id")?),
        })
    }

    pub fn count_by_store(&self, store_id: i64) -> AppResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM inventory WHERE store_id = ?1",
            params![store_id],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}

impl RecordStore<Inventory> for SqliteInventoryStore {
    fn insert(&self, inventory: &Inventory) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO inventory (film_id, store_id, last_update) VALUES (?1, ?2, ?3)",
            params![
                inventory.film.meta.id,
                inventory.store.meta.id,
                to_column(&inventory.meta.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, inventory: &Inventory) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE inventory SET film_id = ?2, store_id = ?3, last_update = ?4
             WHERE inventory_id = ?1",
            params![
                inventory.meta.id,
                inventory.film.meta.id,
                inventory.store.meta.id,
                to_column(&inventory.meta.updated_at),
            ],
        )?;

        Ok(rows > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM inventory WHERE inventory_id = ?1", params![id])?;

        Ok(rows > 0)
    }

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<Inventory>> {
        let mut stmt = self
            .conn
            .prepare(&Self::select("WHERE i.inventory_id = ?1"))?;

        match stmt.query_row(params![id], Self::row_to_inventory) {
            Ok(inventory) => Ok(Some(inventory)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn fetch_all(&self) -> AppResult<Vec<Inventory>> {
        let mut stmt = self
            .conn
            .prepare(&Self::select("ORDER BY i.inventory_id LIMIT ?1"))?;

        let copies = stmt
            .query_map(params![INVENTORY_LOAD_LIMIT], Self::row_to_inventory)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(copies)
    }

    fn search(&self, term: &str) -> AppResult<Vec<Inventory>> {
        let mut stmt = self.conn.prepare(&Self::select(
            "WHERE LOWER(f.title) LIKE ?1 ESCAPE '\\' ORDER BY i.inventory_id",
        ))?;

        let copies = stmt
            .query_map(params![like_pattern(term)], Self::row_to_inventory)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(copies)
    }
}

impl Repository<Inventory, SqliteInventoryStore> {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self::with_cache(SqliteInventoryStore::new(conn), settings)
    }

    /// Copies held by a store, 0 on failure
    pub fn count_by_store(&self, store_id: i64) -> i64 {
        if store_id <= 0 {
            error!("Invalid store id {}", store_id);
            return 0;
        }
        self.store().count_by_store(store_id).unwrap_or_else(|err| {
            error!("Failed to count inventory of store {}: {}", store_id, err);
            0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::domain::Film;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        crate::db::seed_demo_data(&db.connection()).unwrap();
        db
    }

    #[test]
    fn test_loads_film_with_copy() {
        let db = seeded();
        let mut repo = InventoryRepository::sqlite(db.connection(), CacheSettings::default());

        let copy = repo.get_by_id(4).unwrap();
        assert_eq!(copy.film.title, "ADAPTATION HOLES");
        assert_eq!(copy.film.language.name, "English");
        assert_eq!(copy.store.meta.id, 2);
    }

    #[test]
    fn test_inventory_lifecycle() {
        let db = seeded();
        let mut repo = InventoryRepository::sqlite(db.connection(), CacheSettings::default());

        let mut copy = Inventory::new(Film::reference(2, "ACE GOLDFINGER"), Store::reference(2));
        assert!(repo.create(&mut copy));
        assert_eq!(repo.count_by_store(2), 4);

        copy.store = Store::reference(1);
        assert!(repo.update(&mut copy));
        assert_eq!(repo.count_by_store(1), 4);

        assert!(repo.delete(copy.meta.id));
        assert_eq!(repo.count_by_store(1), 3);
    }

    #[test]
    fn test_unknown_film_is_rejected() {
        let db = seeded();
        let mut repo = InventoryRepository::sqlite(db.connection(), CacheSettings::default());

        let mut copy = Inventory::new(Film::reference(999, "GHOST"), Store::reference(1));
        assert!(!repo.create(&mut copy));
    }

    #[test]
    fn test_search_by_title() {
        let db = seeded();
        let mut repo = InventoryRepository::sqlite(db.connection(), CacheSettings::default());

        let ids: Vec<i64> = repo
            .search(&["academy"])
            .into_iter()
            .map(|c| c.meta.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 6]);
    }

    #[test]
    fn test_bulk_load_is_capped() {
        let db = seeded();
        let conn = db.connection();
        for _ in 0..INVENTORY_LOAD_LIMIT {
            conn.execute(
                "INSERT INTO inventory (film_id, store_id) VALUES (1, 1)",
                [],
            )
            .unwrap();
        }

        let mut repo = InventoryRepository::sqlite(db.connection(), CacheSettings::default());
        assert_eq!(repo.get_all().len(), INVENTORY_LOAD_LIMIT as usize);
    }

    #[test]
    fn test_count_by_store() {
        let db = seeded();
        let repo = InventoryRepository::sqlite(db.connection(), CacheSettings::default());

        assert_eq!(repo.count_by_store(1), 3);
        assert_eq!(repo.count_by_store(2), 3);
        assert_eq!(repo.count_by_store(0), 0);
    }
}
