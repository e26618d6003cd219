use indexmap::IndexMap;
use sciplens_api::models::ParsedSymbol;
use serde::Serialize;
use tracing::debug;

/// Counters describing a parse cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Bounded memo of parse results keyed by the exact input text.
///
/// Entries are kept in insertion order. Once the cache holds `capacity`
/// entries, the oldest half goes in one sweep before the next insert. Failed
/// parses are remembered as `None`. A capacity of zero disables caching.
pub struct ParseCache {
    entries: IndexMap<String, Option<ParsedSymbol>>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ParseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// `Some(result)` on a hit, where `result` is itself `None` for a cached failure.
    pub fn get(&mut self, key: &str) -> Option<Option<ParsedSymbol>> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, value: Option<ParsedSymbol>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            let evict = (self.capacity / 2).clamp(1, self.entries.len());
            self.entries.drain(..evict);
            self.evictions += evict as u64;
            debug!(evicted = evict, capacity = self.capacity, "parse cache sweep");
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}
