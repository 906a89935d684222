// src/domain/country.rs
//
// Country Entity

use serde::{Deserialize, Serialize};

use crate::domain::record::{require_text, Record, RecordMeta};
use crate::domain::DomainResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub meta: RecordMeta,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::new(),
            name: name.into(),
        }
    }

    /// A country known only by id and name, as loaded through a join
    pub fn reference(id: i64, name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::with_id(id),
            name: name.into(),
        }
    }
}

/// Validates Country invariants
pub fn validate_country(country: &Country) -> DomainResult<()> {
    require_text("country", &country.name)
}

impl Record for Country {
    const KIND: &'static str = "country";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_country(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.meta.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_country_name_fails() {
        assert!(validate_country(&Country::new("")).is_err());
        assert!(validate_country(&Country::new("Chile")).is_ok());
    }
}
