pub mod entity;
pub mod invariants;

pub use entity::City;
pub use invariants::validate_city;
