// src/domain/inventory.rs
//
// Inventory Entity
//
// One physical copy of a film held by a store.

use serde::{Deserialize, Serialize};

use crate::domain::film::Film;
use crate::domain::record::{require_reference, Record, RecordMeta};
use crate::domain::store::Store;
use crate::domain::DomainResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub meta: RecordMeta,
    pub film: Film,
    pub store: Store,
}

impl Inventory {
    pub fn new(film: Film, store: Store) -> Self {
        Self {
            meta: RecordMeta::new(),
            film,
            store,
        }
    }
}

/// Validates Inventory invariants
pub fn validate_inventory(inventory: &Inventory) -> DomainResult<()> {
    require_reference("film", inventory.film.meta.id)?;
    require_reference("store", inventory.store.meta.id)?;
    Ok(())
}

impl Record for Inventory {
    const KIND: &'static str = "inventory";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_inventory(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.film.title]
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} film #{} {} @ store {}",
            self.meta.id, self.film.meta.id, self.film.title, self.store.meta.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_needs_film_and_store() {
        let ok = Inventory::new(Film::reference(1, "ACADEMY DINOSAUR"), Store::reference(1));
        assert!(validate_inventory(&ok).is_ok());

        let no_store = Inventory::new(Film::reference(1, "ACADEMY DINOSAUR"), Store::default());
        assert!(validate_inventory(&no_store).is_err());
    }
}
