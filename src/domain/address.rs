// src/domain/address.rs
//
// Address Entity
//
// Owned by customers, staff and stores. Loaded by join, never cached on its own.

use serde::{Deserialize, Serialize};

use crate::domain::city::City;
use crate::domain::record::{require_reference, require_text, Record, RecordMeta};
use crate::domain::DomainResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub meta: RecordMeta,
    pub address: String,
    pub address2: Option<String>,
    pub district: String,
    pub city: City,
    pub postal_code: Option<String>,
    pub phone: String,
}

impl Address {
    pub fn new(
        address: impl Into<String>,
        district: impl Into<String>,
        city: City,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            address: address.into(),
            address2: None,
            district: district.into(),
            city,
            postal_code: None,
            phone: phone.into(),
        }
    }

    /// An address known by id and street line, as loaded through a join
    pub fn reference(id: i64, address: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::with_id(id),
            address: address.into(),
            ..Self::default()
        }
    }
}

/// Validates Address invariants
pub fn validate_address(address: &Address) -> DomainResult<()> {
    require_text("address", &address.address)?;
    require_text("district", &address.district)?;
    require_text("phone", &address.phone)?;
    require_reference("city", address.city.meta.id)?;
    Ok(())
}

impl Record for Address {
    const KIND: &'static str = "address";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_address(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.address, &self.district]
    }
}
