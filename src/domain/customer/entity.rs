use serde::{Deserialize, Serialize};

use crate::domain::address::Address;
use crate::domain::record::{DeleteMode, Record, RecordMeta};
use crate::domain::store::Store;
use crate::domain::DomainResult;

use super::invariants::validate_customer;

/// A rental customer. The only kind with an active column, so deletes deactivate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub meta: RecordMeta,

    /// Home store, referenced by id
    pub store: Store,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,

    /// Loaded by join with the street line only
    pub address: Address,
}

impl Customer {
    pub fn new(
        store: Store,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        address: Address,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            store,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            address,
        }
    }
}

impl Record for Customer {
    const KIND: &'static str = "customer";
    const DELETE_MODE: DeleteMode = DeleteMode::Soft;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> DomainResult<()> {
        validate_customer(self)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.first_name.as_str(), self.last_name.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} {} <{}> store {} | {} | {}",
            self.meta.id,
            self.first_name,
            self.last_name,
            self.email.as_deref().unwrap_or("-"),
            self.store.meta.id,
            self.address.address,
            if self.meta.active { "active" } else { "inactive" }
        )
    }
}
