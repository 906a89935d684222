use super::entity::Actor;
use crate::domain::record::require_text;
use crate::domain::DomainResult;

/// Validates all Actor invariants
pub fn validate_actor(actor: &Actor) -> DomainResult<()> {
    require_text("first_name", &actor.first_name)?;
    require_text("last_name", &actor.last_name)?;
    Ok(())
}

/// Actor invariants:
///
/// 1. First and last name are never blank
/// 2. Actors are hard-deleted (the table has no active column)
