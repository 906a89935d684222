use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::language::Language;
use crate::domain::record::{Record, RecordMeta};
use crate::domain::{DomainError, DomainResult};

use super::invariants::validate_film;

/// A title in the rental catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub meta: RecordMeta,
    pub title: String,
    pub description: String,
    pub release_year: i32,

    /// Spoken language, loaded eagerly by join
    pub language: Language,

    /// Original language, when it differs
    pub original_language: Option<Language>,

    /// Rental period in days
    pub rental_duration: i32,
    pub rental_rate: f64,

    /// Running time in minutes
    pub length: Option<i32>,
    pub replacement_cost: f64,
    pub rating: FilmRating,
    pub special_features: Vec<String>,
}

/// MPAA rating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilmRating {
    #[default]
    G,
    PG,
    #[serde(rename = "PG-13")]
    PG13,
    R,
    #[serde(rename = "NC-17")]
    NC17,
}

impl Film {
    /// Create a film with the catalog defaults (3 days, 4.99, 19.99, G)
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        release_year: i32,
        language: Language,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            title: title.into(),
            description: description.into(),
            release_year,
            language,
            original_language: None,
            rental_duration: 3,
            rental_rate: 4.99,
            length: None,
            replacement_cost: 19.99,
            rating: FilmRating::G,
            special_features: Vec::new(),
        }
    }

    pub fn reference(id: i64, title: impl Into<String>) -> Self {
        let mut film = Self::new(title, "", 0, Language::default());
        film.meta = RecordMeta::with_id(id);
        film
    }

    /// Special features as stored (comma separated)
    pub fn special_features_column(&self) -> Option<String> {
        if self.special_features.is_empty() {
            None
        } else {
            Some(self.special_features.join(","))
        }
    }

    pub fn parse_special_features(column: Option<&str>) -> Vec<String> {
        column
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|feature| !feature.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Record for Film {
    const KIND: &'static str = "film";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_film(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

impl std::fmt::Display for Film {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({}) [{}] {} min, ${:.2}/{}d",
            self.meta.id,
            self.title,
            self.release_year,
            self.rating,
            self.length.map(|l| l.to_string()).unwrap_or_else(|| "?".to_string()),
            self.rental_rate,
            self.rental_duration
        )
    }
}

impl std::fmt::Display for FilmRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilmRating::G => write!(f, "G"),
            FilmRating::PG => write!(f, "PG"),
            FilmRating::PG13 => write!(f, "PG-13"),
            FilmRating::R => write!(f, "R"),
            FilmRating::NC17 => write!(f, "NC-17"),
        }
    }
}

impl FromStr for FilmRating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G" => Ok(FilmRating::G),
            "PG" => Ok(FilmRating::PG),
            "PG-13" | "PG13" => Ok(FilmRating::PG13),
            "R" => Ok(FilmRating::R),
            "NC-17" | "NC17" => Ok(FilmRating::NC17),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown film rating '{}'",
                other
            ))),
        }
    }
}
