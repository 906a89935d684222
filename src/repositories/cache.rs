// src/repositories/cache.rs
//
// Local record cache kept by each repository
//
// STALENESS:
// - Entries change only through this process's own create/update/delete
//   and through the cache-miss paths (point lookup, search, bulk load)
// - Rows changed by anyone else are never noticed until a bulk reload
// - Nested references (a city's country, a customer's address) are copies
//   taken at load time and go stale with the entry that holds them

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::domain::Record;

/// Bounds applied to a [`RecordCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum entries kept; the oldest inserted are evicted first.
    /// `None` keeps everything.
    pub capacity: Option<usize>,

    /// Age after which a bulk load is no longer trusted by `get_all`.
    /// `None` trusts any non-empty cache, however it was filled.
    pub ttl: Option<Duration>,
}

impl CacheSettings {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Insertion-ordered records of one kind
#[derive(Debug)]
pub struct RecordCache<T> {
    entries: VecDeque<T>,
    settings: CacheSettings,
    loaded_at: Option<Instant>,
}

impl<T: Record> RecordCache<T> {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            entries: VecDeque::new(),
            settings,
            loaded_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `get_all` may answer from the cache
    pub fn is_fresh(&self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        match self.settings.ttl {
            None => true,
            Some(ttl) => self
                .loaded_at
                .map_or(false, |loaded| loaded.elapsed() < ttl),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Linear scan by id
    pub fn find(&self, id: i64) -> Option<&T> {
        self.entries.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    /// Append, evicting the oldest entries past capacity
    pub fn push(&mut self, record: T) {
        self.entries.push_back(record);
        self.enforce_capacity();
    }

    /// Replace the entry with the same id. Returns false if it was not cached.
    pub fn replace(&mut self, record: T) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|cached| cached.id() == record.id())
        {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Drop the entry. Returns false if it was not cached.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|record| record.id() != id);
        self.entries.len() != before
    }

    /// Clear the active flag of a cached entry and refresh its timestamp
    pub fn deactivate(&mut self, id: i64) -> bool {
        match self.entries.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                record.meta_mut().active = false;
                record.touch();
                true
            }
            None => false,
        }
    }

    /// Swap in the result of a bulk load
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.entries = records.into();
        self.enforce_capacity();
        self.loaded_at = Some(Instant::now());
    }

    /// Defensive copy of every entry
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }

    fn enforce_capacity(&mut self) {
        if let Some(capacity) = self.settings.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, Customer, Address, Store};

    fn actor(id: i64, first: &str) -> Actor {
        let mut actor = Actor::new(first, "Doe");
        actor.meta.id = id;
        actor
    }

    #[test]
    fn test_find_replace_remove() {
        let mut cache = RecordCache::new(CacheSettings::unbounded());
        cache.push(actor(1, "John"));
        cache.push(actor(2, "Jane"));

        assert_eq!(cache.find(2).unwrap().first_name, "Jane");
        assert!(cache.replace(actor(2, "Janet")));
        assert_eq!(cache.find(2).unwrap().first_name, "Janet");
        assert!(!cache.replace(actor(9, "Nobody")));

        assert!(cache.remove(1));
        assert!(!cache.remove(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = RecordCache::new(CacheSettings {
            capacity: Some(2),
            ttl: None,
        });
        cache.push(actor(1, "A"));
        cache.push(actor(2, "B"));
        cache.push(actor(3, "C"));

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
        assert!(cache.contains(3));
    }

    #[test]
    fn test_bulk_load_respects_capacity() {
        let mut cache = RecordCache::new(CacheSettings {
            capacity: Some(2),
            ttl: None,
        });
        cache.replace_all(vec![actor(1, "A"), actor(2, "B"), actor(3, "C")]);

        let ids: Vec<i64> = cache.iter().map(|a| a.meta.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_freshness_without_ttl() {
        let mut cache: RecordCache<Actor> = RecordCache::new(CacheSettings::unbounded());
        assert!(!cache.is_fresh());

        cache.push(actor(1, "A"));
        assert!(cache.is_fresh());
    }

    #[test]
    fn test_zero_ttl_is_never_fresh() {
        let mut cache = RecordCache::new(CacheSettings {
            capacity: None,
            ttl: Some(Duration::ZERO),
        });
        cache.replace_all(vec![actor(1, "A")]);
        assert!(!cache.is_fresh());
    }

    #[test]
    fn test_ttl_requires_a_bulk_load() {
        let mut cache = RecordCache::new(CacheSettings {
            capacity: None,
            ttl: Some(Duration::from_secs(60)),
        });
        cache.push(actor(1, "A"));
        assert!(!cache.is_fresh());

        cache.replace_all(vec![actor(1, "A")]);
        assert!(cache.is_fresh());
    }

    #[test]
    fn test_deactivate() {
        let mut customer = Customer::new(
            Store::reference(1),
            "MARY",
            "SMITH",
            None,
            Address::reference(5, "1913 Hanoi Way"),
        );
        customer.meta.id = 1;

        let mut cache = RecordCache::new(CacheSettings::unbounded());
        cache.push(customer);

        assert!(cache.deactivate(1));
        assert!(!cache.find(1).unwrap().meta.active);
        assert!(!cache.deactivate(2));
    }
}
