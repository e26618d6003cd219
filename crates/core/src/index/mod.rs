//! Index builder and the frozen `CodeIndex` it produces.

pub mod analytics;
pub mod call_sites;
pub mod code_index;
pub mod relations;

pub use analytics::{ComplexityReport, DefinitionEntry, IndexStatistics};
pub use call_sites::{CallSite, CallSiteLocator};
pub use code_index::{CodeIndex, SymbolId};

use crate::codec::SymbolCodec;
use sciplens_api::models::Index;

/// Turns an unbuilt [`Index`] into a queryable [`CodeIndex`].
///
/// Building consumes the snapshot, so an index can only be built once:
///
/// ```compile_fail
/// use sciplens_api::models::Index;
/// use sciplens_core::index::IndexBuild;
///
/// let index = Index::default();
/// let first = index.build();
/// let second = index.build();
/// ```
pub trait IndexBuild {
    fn build(self) -> CodeIndex;

    /// Build with a caller-provided codec, sharing its parse cache.
    fn build_with(self, codec: &SymbolCodec) -> CodeIndex;
}

impl IndexBuild for Index {
    fn build(self) -> CodeIndex {
        CodeIndex::from_index(self)
    }

    fn build_with(self, codec: &SymbolCodec) -> CodeIndex {
        CodeIndex::from_index_with(self, codec)
    }
}
