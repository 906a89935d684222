// src/repositories/actor_repository.rs
//
// Actor persistence

use log::error;
use rusqlite::{params, Row};
use serde::Serialize;

use crate::db::SharedConnection;
use crate::domain::{Actor, RecordMeta};
use crate::error::{AppError, AppResult};

use super::cache::CacheSettings;
use super::record_store::RecordStore;
use super::repository::Repository;
use super::rows::{like_pattern, timestamp, to_column};

pub type ActorRepository = Repository<Actor, SqliteActorStore>;

/// Actors ranked by appearances
const TOP_ACTORS: i64 = 5;

const SELECT_ACTOR: &str = "SELECT actor_id, first_name, last_name, last_update FROM actor";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorFilmCount {
    pub actor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub film_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorStatistics {
    pub total_actors: i64,
    pub top_actors: Vec<ActorFilmCount>,
}

pub struct SqliteActorStore {
    conn: SharedConnection,
}

impl SqliteActorStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Map an `actor` row. Also used for joins that select the same columns.
    pub(crate) fn row_to_actor(row: &Row) -> Result<Actor, rusqlite::Error> {
        let last_update = timestamp(row, "last_update")?;

        Ok(Actor {
            meta: RecordMeta::loaded(row.get("actor_id")?, last_update, last_update, true),
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
        })
    }

    pub fn statistics(&self) -> AppResult<ActorStatistics> {
        let total_actors: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM actor", [], |row| row.get(0))?;

        let mut stmt = self.conn.prepare(
            "SELECT a.actor_id, a.first_name, a.last_name, COUNT(fa.film_id) AS film_count
             FROM actor a
             JOIN film_actor fa ON fa.actor_id = a.actor_id
             GROUP BY a.actor_id, a.first_name, a.last_name
             ORDER BY film_count DESC, a.actor_id
             LIMIT ?1",
        )?;

        let top_actors = stmt
            .query_map(params![TOP_ACTORS], |row| {
                Ok(ActorFilmCount {
                    actor_id: row.get("actor_id")?,
                    first_name: row.get("first_name")?,
                    last_name: row.get("last_name")?,
                    film_count: row.get("film_count")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ActorStatistics {
            total_actors,
            top_actors,
        })
    }
}

impl RecordStore<Actor> for SqliteActorStore {
    fn insert(&self, actor: &Actor) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO actor (first_name, last_name, last_update) VALUES (?1, ?2, ?3)",
            params![
                actor.first_name,
                actor.last_name,
                to_column(&actor.meta.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, actor: &Actor) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE actor SET first_name = ?2, last_name = ?3, last_update = ?4
             WHERE actor_id = ?1",
            params![
                actor.meta.id,
                actor.first_name,
                actor.last_name,
                to_column(&actor.meta.updated_at),
            ],
        )?;

        Ok(rows > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM actor WHERE actor_id = ?1", params![id])?;

        Ok(rows > 0)
    }

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<Actor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE actor_id = ?1", SELECT_ACTOR))?;

        match stmt.query_row(params![id], Self::row_to_actor) {
            Ok(actor) => Ok(Some(actor)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn fetch_all(&self) -> AppResult<Vec<Actor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY actor_id", SELECT_ACTOR))?;

        let actors = stmt
            .query_map([], Self::row_to_actor)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(actors)
    }

    fn search(&self, term: &str) -> AppResult<Vec<Actor>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE LOWER(first_name) LIKE ?1 ESCAPE '\\'
                OR LOWER(last_name) LIKE ?1 ESCAPE '\\'
             ORDER BY actor_id",
            SELECT_ACTOR
        ))?;

        let actors = stmt
            .query_map(params![like_pattern(term)], Self::row_to_actor)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(actors)
    }
}

impl Repository<Actor, SqliteActorStore> {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self::with_cache(SqliteActorStore::new(conn), settings)
    }

    /// Actor count and the most prolific actors. Empty on failure.
    pub fn statistics(&self) -> ActorStatistics {
        self.store().statistics().unwrap_or_else(|err| {
            error!("Failed to compute actor statistics: {}", err);
            ActorStatistics::default()
        })
    }
}
