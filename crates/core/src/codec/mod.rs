//! Symbol grammar codec
//!
//! Turns raw symbol strings into [`ParsedSymbol`] values and back. A
//! [`SymbolCodec`] owns its parse cache and interning pool, so independent
//! codecs never share state and one codec can be shared across threads.

pub mod cache;
pub mod format;
pub mod pool;
mod scanner;

pub use cache::{CacheStats, ParseCache};
pub use format::format_symbol;
pub use pool::SymbolPool;

use crate::config::{DEFAULT_PARSE_CACHE_CAPACITY, SciplensConfig};
use parking_lot::Mutex;
use sciplens_api::models::{ParsedSymbol, SymbolInformation, SymbolKind};

/// Parse without any cache. Returns `None` for malformed input.
pub fn parse_symbol(symbol: &str) -> Option<ParsedSymbol> {
    scanner::parse(symbol, &SymbolPool::new())
}

/// Which fields of a `SymbolInformation` were filled in from its symbol string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetadataFallback {
    pub display_name: bool,
    pub kind: bool,
}

pub struct SymbolCodec {
    cache: Mutex<ParseCache>,
    pool: SymbolPool,
}

impl Default for SymbolCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolCodec {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PARSE_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(ParseCache::new(capacity)),
            pool: SymbolPool::new(),
        }
    }

    pub fn from_config(config: &SciplensConfig) -> Self {
        Self::with_capacity(config.parse_cache_capacity)
    }

    /// Parse a symbol string. Never panics; malformed input yields `None`.
    pub fn parse(&self, symbol: &str) -> Option<ParsedSymbol> {
        let cached = self.cache.lock().get(symbol);
        if let Some(hit) = cached {
            return hit;
        }

        let parsed = scanner::parse(symbol, &self.pool);
        self.cache.lock().insert(symbol.to_string(), parsed.clone());
        parsed
    }

    pub fn format(&self, symbol: &ParsedSymbol) -> String {
        format_symbol(symbol)
    }

    /// Display name and kind implied by the last descriptor, or an empty name
    /// and `Unspecified` when the symbol does not parse.
    pub fn infer_metadata(&self, symbol: &str) -> (String, SymbolKind) {
        match self.parse(symbol).as_ref().and_then(|p| p.last_descriptor()) {
            Some(last) => (last.name.to_string(), last.suffix.fallback_kind()),
            None => (String::new(), SymbolKind::Unspecified),
        }
    }

    /// Fill a missing display name or an `Unspecified` kind from the symbol
    /// string. Provided values are kept; local symbols are left untouched.
    pub fn resolve_metadata(
        &self,
        mut info: SymbolInformation,
    ) -> (SymbolInformation, MetadataFallback) {
        let mut fallback = MetadataFallback::default();
        let needs_name = info.display_name.is_empty();
        let needs_kind = info.kind == SymbolKind::Unspecified;
        if info.is_local() || !(needs_name || needs_kind) {
            return (info, fallback);
        }

        let (name, kind) = self.infer_metadata(&info.symbol);
        if needs_name && !name.is_empty() {
            info.display_name = name;
            fallback.display_name = true;
        }
        if needs_kind && kind != SymbolKind::Unspecified {
            info.kind = kind;
            fallback.kind = true;
        }
        (info, fallback)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Number of distinct strings interned so far.
    pub fn interned_count(&self) -> usize {
        self.pool.len()
    }
}
