// src/domain/store.rs
//
// Store Entity (a rental shop, not the backing database)

use serde::{Deserialize, Serialize};

use crate::domain::address::Address;
use crate::domain::record::{require_reference, Record, RecordMeta};
use crate::domain::staff::Staff;
use crate::domain::DomainResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub meta: RecordMeta,
    pub manager: Staff,
    pub address: Address,
}

impl Store {
    pub fn new(manager: Staff, address: Address) -> Self {
        Self {
            meta: RecordMeta::new(),
            manager,
            address,
        }
    }

    /// A store known only by id, as referenced from customers and inventory
    pub fn reference(id: i64) -> Self {
        Self {
            meta: RecordMeta::with_id(id),
            ..Self::default()
        }
    }
}

/// Validates Store invariants
pub fn validate_store(store: &Store) -> DomainResult<()> {
    require_reference("manager", store.manager.meta.id)?;
    require_reference("address", store.address.meta.id)?;
    Ok(())
}

impl Record for Store {
    const KIND: &'static str = "store";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_store(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.address.address]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_needs_manager_and_address() {
        assert!(validate_store(&Store::reference(1)).is_err());

        let store = Store::new(Staff::reference(1), Address::reference(1, "47 MySakila Drive"));
        assert!(validate_store(&store).is_ok());
    }
}
