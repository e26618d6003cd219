pub mod error;
pub mod models;
pub mod semantic;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use semantic::{
    CallHierarchyAnalyzer, HierarchyAnalyzer, HierarchyDirection, ReferenceAnalyzer, SymbolLookup,
};

/// Composite trait representing the full read-only query surface of a built index.
/// This allows clients to depend on a single trait instead of multiple individual ones.
pub trait CodeIntelligence:
    SymbolLookup + ReferenceAnalyzer + HierarchyAnalyzer + CallHierarchyAnalyzer
{
}

impl<T> CodeIntelligence for T where
    T: SymbolLookup + ReferenceAnalyzer + HierarchyAnalyzer + CallHierarchyAnalyzer
{
}
