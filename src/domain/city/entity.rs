use serde::{Deserialize, Serialize};

use crate::domain::country::Country;
use crate::domain::record::{Record, RecordMeta};
use crate::domain::DomainResult;

use super::invariants::validate_city;

/// A city, owning a copy of the country it belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub meta: RecordMeta,
    pub name: String,

    /// Loaded eagerly by join. Not refreshed if the country row changes later.
    pub country: Country,
}

impl City {
    pub fn new(name: impl Into<String>, country: Country) -> Self {
        Self {
            meta: RecordMeta::new(),
            name: name.into(),
            country,
        }
    }

    pub fn reference(id: i64) -> Self {
        Self {
            meta: RecordMeta::with_id(id),
            ..Self::default()
        }
    }
}

impl Record for City {
    const KIND: &'static str = "city";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_city(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.country.name]
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.meta.id, self.name, self.country.name)
    }
}
