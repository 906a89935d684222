use super::entity::City;
use crate::domain::record::{require_reference, require_text};
use crate::domain::DomainResult;

/// Validates all City invariants
pub fn validate_city(city: &City) -> DomainResult<()> {
    require_text("city", &city.name)?;
    require_reference("country", city.country.meta.id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Country;

    #[test]
    fn test_valid_city() {
        let city = City::new("Santiago", Country::reference(22, "Chile"));
        assert!(validate_city(&city).is_ok());
    }

    #[test]
    fn test_city_without_country_fails() {
        let city = City::new("Santiago", Country::new("Chile"));
        assert!(validate_city(&city).is_err());
    }

    #[test]
    fn test_blank_city_name_fails() {
        let city = City::new("", Country::reference(22, "Chile"));
        assert!(validate_city(&city).is_err());
    }
}
