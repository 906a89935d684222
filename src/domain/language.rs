// src/domain/language.rs
//
// Language Entity
//
// Loaded only as a film's (original) language; it has no repository.

use serde::{Deserialize, Serialize};

use crate::domain::record::{require_text, Record, RecordMeta};
use crate::domain::DomainResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub meta: RecordMeta,
    pub name: String,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::new(),
            name: name.into(),
        }
    }

    pub fn reference(id: i64, name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::with_id(id),
            name: name.into(),
        }
    }
}

/// Validates Language invariants
pub fn validate_language(language: &Language) -> DomainResult<()> {
    require_text("language", &language.name)
}

impl Record for Language {
    const KIND: &'static str = "language";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_language(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}
