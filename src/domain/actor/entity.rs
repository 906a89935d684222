use serde::{Deserialize, Serialize};

use crate::domain::record::{Record, RecordMeta};
use crate::domain::DomainResult;

use super::invariants::validate_actor;

/// A performer credited on films
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub meta: RecordMeta,
    pub first_name: String,
    pub last_name: String,
}

impl Actor {
    /// Create an actor that has not been stored yet
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Actor {
    const KIND: &'static str = "actor";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_actor(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name]
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} {} (updated {})",
            self.meta.id,
            self.first_name,
            self.last_name,
            self.meta.updated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
