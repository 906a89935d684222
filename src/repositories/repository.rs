// src/repositories/repository.rs
//
// Generic cache-then-store repository
//
// PRINCIPLES:
// - One implementation of create/update/delete/get/search for every kind
// - Validation happens here, before the store is touched
// - Storage faults are logged and collapse into false / None / empty
// - A failed mutation leaves both the caller's record and the cache as they were

use log::{debug, error, info, warn};

use crate::domain::{DeleteMode, Record};
use crate::error::AppResult;

use super::cache::{CacheSettings, RecordCache};
use super::record_store::RecordStore;

pub struct Repository<T, S>
where
    T: Record + 'static,
    S: RecordStore<T>,
{
    store: S,
    cache: RecordCache<T>,
}

impl<T, S> Repository<T, S>
where
    T: Record + 'static,
    S: RecordStore<T>,
{
    pub fn new(store: S) -> Self {
        Self::with_cache(store, CacheSettings::default())
    }

    pub fn with_cache(store: S, settings: CacheSettings) -> Self {
        Self {
            store,
            cache: RecordCache::new(settings),
        }
    }

    /// The underlying store, for kind-specific queries
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &RecordCache<T> {
        &self.cache
    }

    /// Insert a new record.
    ///
    /// On success the record carries its new id and refreshed timestamp and
    /// is appended to the cache.
    pub fn create(&mut self, record: &mut T) -> bool {
        if let Err(err) = record.validate() {
            error!("Invalid {} rejected on create: {}", T::KIND, err);
            return false;
        }

        let mut candidate = record.clone();
        candidate.touch();

        match self.store.insert(&candidate) {
            Ok(id) => {
                candidate.meta_mut().id = id;
                self.cache.push(candidate.clone());
                *record = candidate;
                info!("{} created with id {}", T::KIND, id);
                true
            }
            Err(err) => {
                error!("Failed to create {}: {}", T::KIND, err);
                false
            }
        }
    }

    /// Overwrite an existing record and refresh (or add) the cached copy
    pub fn update(&mut self, record: &mut T) -> bool {
        let id = record.id();
        if id <= 0 {
            error!("Cannot update {} without an id", T::KIND);
            return false;
        }
        if let Err(err) = record.validate() {
            error!("Invalid {} {} rejected on update: {}", T::KIND, id, err);
            return false;
        }

        let mut candidate = record.clone();
        candidate.touch();

        match self.store.update(&candidate) {
            Ok(true) => {
                if !self.cache.replace(candidate.clone()) {
                    self.cache.push(candidate.clone());
                }
                *record = candidate;
                info!("{} {} updated", T::KIND, id);
                true
            }
            Ok(false) => {
                warn!("No {} with id {} to update", T::KIND, id);
                false
            }
            Err(err) => {
                error!("Failed to update {} {}: {}", T::KIND, id, err);
                false
            }
        }
    }

    /// Remove a record, or deactivate it for soft-delete kinds
    pub fn delete(&mut self, id: i64) -> bool {
        if id <= 0 {
            error!("Invalid {} id {} for delete", T::KIND, id);
            return false;
        }

        match self.store.delete(id) {
            Ok(true) => {
                match T::DELETE_MODE {
                    DeleteMode::Hard => {
                        self.cache.remove(id);
                        info!("{} {} deleted", T::KIND, id);
                    }
                    DeleteMode::Soft => {
                        self.cache.deactivate(id);
                        info!("{} {} deactivated", T::KIND, id);
                    }
                }
                true
            }
            Ok(false) => {
                warn!("No {} with id {} to delete", T::KIND, id);
                false
            }
            Err(err) => {
                error!("Failed to delete {} {}: {}", T::KIND, id, err);
                false
            }
        }
    }

    /// Cached copy if present, otherwise a point lookup that fills the cache
    pub fn get_by_id(&mut self, id: i64) -> Option<T> {
        if id <= 0 {
            error!("Invalid {} id {}", T::KIND, id);
            return None;
        }

        if let Some(record) = self.cache.find(id) {
            debug!("{} {} served from cache", T::KIND, id);
            return Some(record.clone());
        }

        match self.store.fetch_by_id(id) {
            Ok(Some(record)) => {
                self.cache.push(record.clone());
                Some(record)
            }
            Ok(None) => {
                debug!("{} {} not found", T::KIND, id);
                None
            }
            Err(err) => {
                error!("Failed to load {} {}: {}", T::KIND, id, err);
                None
            }
        }
    }

    /// Re-read one record from the store and swap it into the cache.
    ///
    /// For writes whose stored row carries joined columns (an address line,
    /// a country name) the written record only had as a reference id.
    pub fn refresh(&mut self, id: i64) -> Option<T> {
        match self.store.fetch_by_id(id) {
            Ok(Some(record)) => {
                if !self.cache.replace(record.clone()) {
                    self.cache.push(record.clone());
                }
                Some(record)
            }
            Ok(None) => {
                self.cache.remove(id);
                warn!("{} {} vanished from the store", T::KIND, id);
                None
            }
            Err(err) => {
                error!("Failed to reload {} {}: {}", T::KIND, id, err);
                None
            }
        }
    }

    /// Every record. Answers from the cache while it is fresh, otherwise
    /// replaces it with a bulk load.
    pub fn get_all(&mut self) -> Vec<T> {
        if self.cache.is_fresh() {
            return self.cache.snapshot();
        }

        match self.store.fetch_all() {
            Ok(records) => {
                info!("{} {} records loaded", records.len(), T::KIND);
                self.cache.replace_all(records);
                self.cache.snapshot()
            }
            Err(err) => {
                error!("Failed to load {} records: {}", T::KIND, err);
                Vec::new()
            }
        }
    }

    /// Records matching any of the terms.
    ///
    /// Cached matches win; the store is only asked, term by term, when the
    /// cache has none.
    pub fn search<Q: AsRef<str>>(&mut self, terms: &[Q]) -> Vec<T> {
        let terms: Vec<&str> = terms
            .iter()
            .map(|term| term.as_ref().trim())
            .filter(|term| !term.is_empty())
            .collect();

        if terms.is_empty() {
            error!("Empty search terms for {}", T::KIND);
            return Vec::new();
        }

        self.find_cached_or(
            |record| terms.iter().any(|term| record.matches(term)),
            |store| {
                let mut found: Vec<T> = Vec::new();
                for term in &terms {
                    for record in store.search(term)? {
                        if !found.iter().any(|seen| seen.id() == record.id()) {
                            found.push(record);
                        }
                    }
                }
                Ok(found)
            },
        )
    }

    /// Cache-first filtered lookup.
    ///
    /// When no cached record satisfies `predicate`, `fetch` queries the store
    /// and rows not yet cached are appended to the cache.
    pub fn find_cached_or<P, F>(&mut self, predicate: P, fetch: F) -> Vec<T>
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&S) -> AppResult<Vec<T>>,
    {
        let cached: Vec<T> = self
            .cache
            .iter()
            .filter(|record| predicate(*record))
            .cloned()
            .collect();

        if !cached.is_empty() {
            debug!("{} {} records served from cache", cached.len(), T::KIND);
            return cached;
        }

        match fetch(&self.store) {
            Ok(records) => {
                for record in &records {
                    if !self.cache.contains(record.id()) {
                        self.cache.push(record.clone());
                    }
                }
                records
            }
            Err(err) => {
                error!("Failed to query {} records: {}", T::KIND, err);
                Vec::new()
            }
        }
    }
}
