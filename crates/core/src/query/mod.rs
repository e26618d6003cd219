//! Filtered queries and name search over a built index.

pub mod api;
pub mod filter;
pub mod search;

pub use api::{QueryApi, QueryStats};
pub use filter::{
    AndFilter, CustomFilter, DocumentFilter, DocumentationFilter, KindFilter, LanguageFilter,
    NameFilter, NotFilter, OccurrenceCountFilter, OrFilter, PatternFilter, RoleFilter,
    SymbolFilter,
};
pub use search::SymbolSearcher;
