use super::document::{Document, SymbolInformation};
use super::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// An unbuilt project snapshot, exactly as the decoding layer hands it over.
///
/// It carries no lookup structures; building one into a queryable index
/// consumes it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Index {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Symbols defined outside the project.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_symbols: Vec<SymbolInformation>,
}

impl Index {
    pub fn new(
        metadata: Metadata,
        documents: Vec<Document>,
        external_symbols: Vec<SymbolInformation>,
    ) -> Self {
        Self {
            metadata,
            documents,
            external_symbols,
        }
    }
}
