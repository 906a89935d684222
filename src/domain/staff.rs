// src/domain/staff.rs
//
// Staff Entity

use serde::{Deserialize, Serialize};

use crate::domain::address::Address;
use crate::domain::record::{require_reference, require_text, Record, RecordMeta};
use crate::domain::DomainResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub meta: RecordMeta,
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
    pub email: Option<String>,
    pub store_id: i64,
    pub username: String,
    pub password: Option<String>,
}

impl Staff {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: Address,
        username: impl Into<String>,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address,
            email: None,
            store_id: 0,
            username: username.into(),
            password: None,
        }
    }

    pub fn reference(id: i64) -> Self {
        Self {
            meta: RecordMeta::with_id(id),
            ..Self::default()
        }
    }
}

/// Validates Staff invariants
pub fn validate_staff(staff: &Staff) -> DomainResult<()> {
    require_text("first_name", &staff.first_name)?;
    require_text("last_name", &staff.last_name)?;
    require_text("username", &staff.username)?;
    require_reference("address", staff.address.meta.id)?;
    Ok(())
}

impl Record for Staff {
    const KIND: &'static str = "staff";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_staff(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.username]
    }
}
