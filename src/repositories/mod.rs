// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - One generic Repository drives every kind (cache first, store second)
// - Stores are DUMB data mappers behind the RecordStore trait
// - Validation happens in the Repository, never in a store
// - NO cross-repository calls
// - Explicit SQL only

pub mod cache;
pub mod record_store;
pub mod repository;
mod rows;

pub mod actor_repository;
pub mod city_repository;
pub mod country_repository;
pub mod customer_repository;
pub mod film_repository;
pub mod inventory_repository;

pub use cache::{CacheSettings, RecordCache};
pub use record_store::RecordStore;
pub use repository::Repository;

pub use actor_repository::{ActorFilmCount, ActorRepository, ActorStatistics, SqliteActorStore};
pub use city_repository::{CityRepository, CityStatistics, CountryCityCount, SqliteCityStore};
pub use country_repository::{CountryRepository, SqliteCountryStore};
pub use customer_repository::{
    CustomerRental, CustomerRepository, CustomerStatistics, SqliteCustomerStore,
};
pub use film_repository::{FilmCount, FilmRepository, FilmStatistics, SqliteFilmStore};
pub use inventory_repository::{InventoryRepository, SqliteInventoryStore, INVENTORY_LOAD_LIMIT};
