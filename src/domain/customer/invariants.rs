use super::entity::Customer;
use crate::domain::record::{require_reference, require_text};
use crate::domain::{DomainError, DomainResult};
use crate::validation;

/// Validates all Customer invariants
pub fn validate_customer(customer: &Customer) -> DomainResult<()> {
    require_reference("store", customer.store.meta.id)?;
    require_text("first_name", &customer.first_name)?;
    require_text("last_name", &customer.last_name)?;
    require_reference("address", customer.address.meta.id)?;
    validate_email(customer)?;
    Ok(())
}

/// Email is optional, but a present one must be well-formed
fn validate_email(customer: &Customer) -> DomainResult<()> {
    if let Some(email) = &customer.email {
        if !validation::is_valid_email(email) {
            return Err(DomainError::InvariantViolation(format!(
                "Malformed email '{}'",
                email
            )));
        }
    }
    Ok(())
}

/// Customer invariants:
///
/// 1. Store and address references point at stored rows
/// 2. First and last name are never blank
/// 3. Delete deactivates; the row and its rental history stay

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Store};

    fn customer(email: Option<&str>) -> Customer {
        Customer::new(
            Store::reference(1),
            "MARY",
            "SMITH",
            email.map(str::to_string),
            Address::reference(5, "1913 Hanoi Way"),
        )
    }

    #[test]
    fn test_valid_customer() {
        assert!(validate_customer(&customer(Some("mary.smith@sakilacustomer.org"))).is_ok());
        assert!(validate_customer(&customer(None)).is_ok());
    }

    #[test]
    fn test_malformed_email_fails() {
        assert!(validate_customer(&customer(Some("not-an-email"))).is_err());
    }

    #[test]
    fn test_missing_store_fails() {
        let mut c = customer(None);
        c.store = Store::default();
        assert!(validate_customer(&c).is_err());
    }
}
