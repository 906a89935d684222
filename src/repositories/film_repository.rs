// src/repositories/film_repository.rs
//
// Film persistence
//
// Films are loaded joined with their language names. The film columns are
// selected under fixed aliases so other stores (inventory) can reuse
// `row_to_film` on their own joins.

use std::str::FromStr;

use log::error;
use rusqlite::{params, Row};
use serde::Serialize;

use crate::db::SharedConnection;
use crate::domain::{Actor, Film, FilmRating, Language, RecordMeta};
use crate::error::{AppError, AppResult};

use super::actor_repository::SqliteActorStore;
use super::cache::CacheSettings;
use super::record_store::RecordStore;
use super::repository::Repository;
use super::rows::{like_pattern, timestamp, to_column};

pub type FilmRepository = Repository<Film, SqliteFilmStore>;

/// Film columns plus language names, for joins rooted at `film f`
pub(crate) const FILM_COLUMNS: &str = "f.film_id, f.title, f.description, f.release_year,
     f.language_id, l.name AS language_name,
     f.original_language_id, ol.name AS original_language_name,
     f.rental_duration, f.rental_rate, f.length, f.replacement_cost,
     f.rating, f.special_features, f.last_update";

pub(crate) const FILM_JOINS: &str = "JOIN language l ON l.language_id = f.language_id
     LEFT JOIN language ol ON ol.language_id = f.original_language_id";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmCount {
    pub label: String,
    pub film_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilmStatistics {
    pub total_films: i64,
    pub by_rating: Vec<FilmCount>,
    pub by_category: Vec<FilmCount>,
}

pub struct SqliteFilmStore {
    conn: SharedConnection,
}

impl SqliteFilmStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn select(filter: &str) -> String {
        format!("SELECT {} FROM film f {} {}", FILM_COLUMNS, FILM_JOINS, filter)
    }

    pub(crate) fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let last_update = timestamp(row, "last_update")?;

        let rating_str: String = row.get("rating")?;
        let rating = FilmRating::from_str(&rating_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let original_language_id: Option<i64> = row.get("original_language_id")?;
        let original_language_name: Option<String> = row.get("original_language_name")?;
        let original_language = original_language_id
            .map(|id| Language::reference(id, original_language_name.unwrap_or_default()));

        let special_features: Option<String> = row.get("special_features")?;
        let description: Option<String> = row.get("description")?;
        let release_year: Option<i32> = row.get("release_year")?;

        Ok(Film {
            meta: RecordMeta::loaded(row.get("film_id")?, last_update, last_update, true),
            title: row.get("title")?,
            description: description.unwrap_or_default(),
            release_year: release_year.unwrap_or_default(),
            language: Language::reference(
                row.get("language_id")?,
                row.get::<_, String>("language_name")?,
            ),
            original_language,
            rental_duration: row.get("rental_duration")?,
            rental_rate: row.get("rental_rate")?,
            length: row.get("length")?,
            replacement_cost: row.get("replacement_cost")?,
            rating,
            special_features: Film::parse_special_features(special_features.as_deref()),
        })
    }

    /// Cast of a film, ordered by name
    pub fn actors_of_film(&self, film_id: i64) -> AppResult<Vec<Actor>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.actor_id, a.first_name, a.last_name, a.last_update
             FROM actor a
             JOIN film_actor fa ON fa.actor_id = a.actor_id
             WHERE fa.film_id = ?1
             ORDER BY a.last_name, a.first_name",
        )?;

        let actors = stmt
            .query_map(params![film_id], SqliteActorStore::row_to_actor)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(actors)
    }

    pub fn statistics(&self) -> AppResult<FilmStatistics> {
        let total_films: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM film", [], |row| row.get(0))?;

        let by_rating = self.counts(
            "SELECT rating AS label, COUNT(*) AS film_count
             FROM film
             GROUP BY rating
             ORDER BY film_count DESC, rating",
        )?;

        let by_category = self.counts(
            "SELECT c.name AS label, COUNT(fc.film_id) AS film_count
             FROM category c
             JOIN film_category fc ON fc.category_id = c.category_id
             GROUP BY c.category_id, c.name
             ORDER BY film_count DESC, c.name",
        )?;

        Ok(FilmStatistics {
            total_films,
            by_rating,
            by_category,
        })
    }

    fn counts(&self, sql: &str) -> AppResult<Vec<FilmCount>> {
        let mut stmt = self.conn.prepare(sql)?;

        let counts = stmt
            .query_map([], |row| {
                Ok(FilmCount {
                    label: row.get("label")?,
                    film_count: row.get("film_count")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }
}

impl RecordStore<Film> for SqliteFilmStore {
    fn insert(&self, film: &Film) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO film (
                title, description, release_year, language_id, original_language_id,
                rental_duration, rental_rate, length, replacement_cost, rating,
                special_features, last_update
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                film.title,
                film.description,
                film.release_year,
                film.language.meta.id,
                film.original_language.as_ref().map(|l| l.meta.id),
                film.rental_duration,
                film.rental_rate,
                film.length,
                film.replacement_cost,
                film.rating.to_string(),
                film.special_features_column(),
                to_column(&film.meta.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, film: &Film) -> AppResult<bool> {
        let rows = self.conn.execute(
            "UPDATE film SET
                title = ?2, description = ?3, release_year = ?4, language_id = ?5,
                original_language_id = ?6, rental_duration = ?7, rental_rate = ?8,
                length = ?9, replacement_cost = ?10, rating = ?11,
                special_features = ?12, last_update = ?13
             WHERE film_id = ?1",
            params![
                film.meta.id,
                film.title,
                film.description,
                film.release_year,
                film.language.meta.id,
                film.original_language.as_ref().map(|l| l.meta.id),
                film.rental_duration,
                film.rental_rate,
                film.length,
                film.replacement_cost,
                film.rating.to_string(),
                film.special_features_column(),
                to_column(&film.meta.updated_at),
            ],
        )?;

        Ok(rows > 0)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM film WHERE film_id = ?1", params![id])?;

        Ok(rows > 0)
    }

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<Film>> {
        let mut stmt = self.conn.prepare(&Self::select("WHERE f.film_id = ?1"))?;

        match stmt.query_row(params![id], Self::row_to_film) {
            Ok(film) => Ok(Some(film)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn fetch_all(&self) -> AppResult<Vec<Film>> {
        let mut stmt = self.conn.prepare(&Self::select("ORDER BY f.title"))?;

        let films = stmt
            .query_map([], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(films)
    }

    fn search(&self, term: &str) -> AppResult<Vec<Film>> {
        let mut stmt = self.conn.prepare(&Self::select(
            "WHERE LOWER(f.title) LIKE ?1 ESCAPE '\\'
                OR LOWER(f.description) LIKE ?1 ESCAPE '\\'
             ORDER BY f.title",
        ))?;

        let films = stmt
            .query_map(params![like_pattern(term)], Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(films)
    }
}

impl Repository<Film, SqliteFilmStore> {
    pub fn sqlite(conn: SharedConnection, settings: CacheSettings) -> Self {
        Self::with_cache(SqliteFilmStore::new(conn), settings)
    }

    /// Cast of a film. Empty on failure or for unknown films.
    pub fn actors_of_film(&self, film_id: i64) -> Vec<Actor> {
        if film_id <= 0 {
            error!("Invalid film id {}", film_id);
            return Vec::new();
        }
        self.store().actors_of_film(film_id).unwrap_or_else(|err| {
            error!("Failed to load cast of film {}: {}", film_id, err);
            Vec::new()
        })
    }

    pub fn statistics(&self) -> FilmStatistics {
        self.store().statistics().unwrap_or_else(|err| {
            error!("Failed to compute film statistics: {}", err);
            FilmStatistics::default()
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
    fn test_loads_languages_and_features() {
        let db = seeded();
        let mut repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        let film = repo.get_by_id(3).unwrap();
        assert_eq!(film.title, "ADAPTATION HOLES");
        assert_eq!(film.rating, FilmRating::NC17);
        assert_eq!(film.language.name, "English");
        assert_eq!(film.original_language.unwrap().name, "Japanese");
        assert_eq!(film.special_features, vec!["Trailers"]);
    }

    #[test]
    fn test_film_lifecycle() {
        let db = seeded();
        let mut repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        let mut film = Film::new(
            "ZOOLANDER FICTION",
            "A Fateful Reflection of a Waitress And a Boat",
            2006,
            Language::reference(1, "English"),
        );
        film.rating = FilmRating::R;
        film.length = Some(101);
        film.special_features = vec!["Trailers".into(), "Deleted Scenes".into()];
        assert!(repo.create(&mut film));

        film.rental_rate = 2.99;
        assert!(repo.update(&mut film));

        let stored = SqliteFilmStore::new(db.connection())
            .fetch_by_id(film.meta.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.rental_rate, 2.99);
        assert_eq!(stored.rating, FilmRating::R);
        assert_eq!(stored.special_features.len(), 2);

        assert!(repo.delete(film.meta.id));
        assert!(repo.get_by_id(film.meta.id).is_none());
    }

    #[test]
    fn test_film_with_inventory_cannot_be_deleted() {
        let db = seeded();
        let mut repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        assert!(!repo.delete(1));
        assert!(repo.get_by_id(1).is_some());
    }

    #[test]
    fn test_invalid_film_is_rejected() {
        let db = seeded();
        let mut repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        let mut film = Film::new("NO YEAR", "desc", 0, Language::reference(1, "English"));
        assert!(!repo.create(&mut film));
    }

    #[test]
    fn test_actors_of_film() {
        let db = seeded();
        let repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        let cast: Vec<String> = repo
            .actors_of_film(1)
            .into_iter()
            .map(|a| a.last_name)
            .collect();
        assert_eq!(cast, vec!["DAVIS", "GUINESS"]);
        assert!(repo.actors_of_film(999).is_empty());
    }

    #[test]
    fn test_statistics() {
        let db = seeded();
        let repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        let stats = repo.statistics();
        assert_eq!(stats.total_films, 4);
        assert_eq!(stats.by_rating[0].label, "G");
        assert_eq!(stats.by_rating[0].film_count, 2);
        assert_eq!(stats.by_category[0].label, "Action");
        assert_eq!(stats.by_category[0].film_count, 2);
    }

    #[test]
    fn test_search_by_title() {
        let db = seeded();
        let mut repo = FilmRepository::sqlite(db.connection(), CacheSettings::default());

        let found = repo.search(&["goldfinger"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].meta.id, 2);
    }
}
