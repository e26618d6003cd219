use crate::error::ApiError;
use crate::models::{Document, Occurrence, SymbolInformation};
use std::str::FromStr;

// ============================================================================
// Read-only query traits over a built index
// ============================================================================
//
// Missing documents, symbols or definitions are never errors: every method
// answers with `None` or an empty collection.

/// Direct map lookups.
pub trait SymbolLookup: Send + Sync {
    /// Document registered under a relative path.
    fn document(&self, path: &str) -> Option<&Document>;

    /// Definition-site metadata of a symbol.
    fn symbol_info(&self, symbol: &str) -> Option<&SymbolInformation>;

    /// The document whose symbol table defines `symbol`. When several do, the
    /// last one registered wins.
    fn document_by_symbol(&self, symbol: &str) -> Option<&Document>;

    /// Every occurrence of `symbol`, in document order then occurrence order.
    fn symbol_occurrences(&self, symbol: &str) -> Vec<&Occurrence>;

    /// Every symbol with at least one occurrence.
    fn list_symbols(&self) -> Vec<&str>;
}

/// Definition/reference partition of a symbol's occurrences.
pub trait ReferenceAnalyzer: Send + Sync {
    /// First occurrence carrying the definition role.
    fn find_definition(&self, symbol: &str) -> Option<&Occurrence>;

    /// Every occurrence without the definition role.
    fn find_references(&self, symbol: &str) -> Vec<&Occurrence>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchyDirection {
    Up,
    Down,
    #[default]
    Both,
}

impl FromStr for HierarchyDirection {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(HierarchyDirection::Up),
            "down" => Ok(HierarchyDirection::Down),
            "both" => Ok(HierarchyDirection::Both),
            other => Err(ApiError::InvalidArgument(format!(
                "hierarchy direction must be up, down or both, got '{other}'"
            ))),
        }
    }
}

/// Type hierarchy through implementation relationships.
pub trait HierarchyAnalyzer: Send + Sync {
    /// Symbols declaring an implementation relationship to `symbol`.
    fn find_implementations(&self, symbol: &str) -> Vec<&str>;

    /// Same edge set as `find_implementations`: inheritance and interface
    /// implementation share one relationship flag.
    fn find_subtypes(&self, symbol: &str) -> Vec<&str>;

    /// Targets of `symbol`'s own implementation relationships.
    fn find_supertypes(&self, symbol: &str) -> Vec<&str>;

    /// Supertypes and/or subtypes, deduplicated in first-seen order.
    fn find_hierarchy(&self, symbol: &str, direction: HierarchyDirection) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        if matches!(direction, HierarchyDirection::Up | HierarchyDirection::Both) {
            found.extend(self.find_supertypes(symbol));
        }
        if matches!(direction, HierarchyDirection::Down | HierarchyDirection::Both) {
            found.extend(self.find_subtypes(symbol));
        }
        let mut unique: Vec<&str> = Vec::with_capacity(found.len());
        for s in found {
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        unique
    }
}

/// Call relations inferred from source ranges.
pub trait CallHierarchyAnalyzer: Send + Sync {
    /// Symbols referenced on the lines spanned by `symbol`'s definition.
    fn find_callees(&self, symbol: &str) -> Vec<&str>;

    /// Definitions starting on the enclosing-range line of each reference to
    /// `symbol`.
    fn find_callers(&self, symbol: &str) -> Vec<&str>;

    /// Breadth-first chain of callees from `from` to `to`, both included.
    fn call_path(&self, from: &str, to: &str) -> Option<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("UP".parse::<HierarchyDirection>().ok(), Some(HierarchyDirection::Up));
        assert_eq!(
            "both".parse::<HierarchyDirection>().ok(),
            Some(HierarchyDirection::Both)
        );
        assert!("sideways".parse::<HierarchyDirection>().is_err());
    }
}
