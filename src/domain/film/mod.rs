pub mod entity;
pub mod invariants;

pub use entity::{Film, FilmRating};
pub use invariants::validate_film;
