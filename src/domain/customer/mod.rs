pub mod entity;
pub mod invariants;

pub use entity::Customer;
pub use invariants::validate_customer;
