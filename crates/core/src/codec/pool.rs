use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Interning pool for the header fields and descriptor names of parsed symbols.
///
/// Large indexes repeat the same package and scope names across tens of
/// thousands of symbols; every parse through one pool shares a single
/// allocation per distinct string.
#[derive(Default)]
pub struct SymbolPool {
    strings: Mutex<HashSet<Arc<str>>>,
}

impl SymbolPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Arc<str> {
        let mut pool = self.strings.lock();
        if let Some(existing) = pool.get(s) {
            existing.clone()
        } else {
            let interned: Arc<str> = Arc::from(s);
            pool.insert(interned.clone());
            interned
        }
    }

    pub fn len(&self) -> usize {
        self.strings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_shares_allocation() {
        let pool = SymbolPool::new();
        let a = pool.intern("mypackage");
        let b = pool.intern("mypackage");
        assert!(Arc::ptr_eq(&a, &b));
        pool.intern("other");
        assert_eq!(pool.len(), 2);
    }
}
