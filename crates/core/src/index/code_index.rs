//! Arc-wrapped immutable index over one project snapshot
//!
//! `CodeIndex` owns the documents of an [`Index`] together with the lookup
//! maps derived from them in a single pass. Cloning only bumps a reference
//! counter.

use crate::codec::SymbolCodec;
use crate::config::{DEFAULT_CALL_PATH_MAX_DEPTH, SciplensConfig};
use indexmap::IndexMap;
use lasso::{Rodeo, RodeoReader, Spur};
use sciplens_api::models::{Document, Index, Metadata, Occurrence, SymbolInformation};
use sciplens_api::semantic::{ReferenceAnalyzer, SymbolLookup};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Interned key of a raw symbol string or document path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub(crate) Spur);

/// Position of an occurrence inside the owned documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OccurrenceRef {
    pub document: usize,
    pub occurrence: usize,
}

/// Position of a `SymbolInformation` inside its defining document's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InfoRef {
    pub document: usize,
    pub slot: usize,
}

/// Internal data structure (shared via Arc)
pub(crate) struct CodeIndexInner {
    pub metadata: Metadata,
    pub documents: Vec<Document>,
    pub external_symbols: Vec<SymbolInformation>,

    /// Frozen table of every symbol string and document path
    pub symbols: RodeoReader,

    /// Symbol -> occurrences, in document order then occurrence order
    pub occurrence_index: IndexMap<SymbolId, Vec<OccurrenceRef>>,

    /// Relative path -> document
    pub document_index: HashMap<SymbolId, usize>,

    /// Symbol -> definition metadata and defining document. A symbol defined
    /// in several documents keeps its first position and the last document.
    pub symbol_info_index: IndexMap<SymbolId, InfoRef>,

    pub external_index: HashMap<SymbolId, usize>,
}

/// Immutable, queryable index (cheap to clone via Arc)
#[derive(Clone)]
pub struct CodeIndex {
    inner: Arc<CodeIndexInner>,
    call_path_max_depth: usize,
}

impl CodeIndex {
    /// Build with a private codec using default settings.
    pub fn from_index(index: Index) -> Self {
        Self::from_index_with(index, &SymbolCodec::new())
    }

    /// Build using settings from `config`.
    pub fn from_config(index: Index, config: &SciplensConfig) -> Self {
        Self::from_index_with(index, &SymbolCodec::from_config(config))
            .with_call_path_max_depth(config.call_path_max_depth)
    }

    /// Build, using `codec` to fill in missing display names and kinds.
    pub fn from_index_with(index: Index, codec: &SymbolCodec) -> Self {
        let Index {
            metadata,
            mut documents,
            mut external_symbols,
        } = index;

        info!("Building index over {} documents", documents.len());

        let mut inferred_kinds = 0usize;
        for doc in &mut documents {
            for info in doc.symbols.values_mut() {
                inferred_kinds += usize::from(resolve_in_place(codec, info));
            }
        }
        for info in &mut external_symbols {
            inferred_kinds += usize::from(resolve_in_place(codec, info));
        }

        let mut symbols = Rodeo::default();
        let mut occurrence_index: IndexMap<SymbolId, Vec<OccurrenceRef>> = IndexMap::new();
        let mut document_index = HashMap::with_capacity(documents.len());
        let mut symbol_info_index = IndexMap::new();
        let mut external_index = HashMap::with_capacity(external_symbols.len());
        let mut total_symbols = 0usize;
        let mut total_occurrences = 0usize;

        for (d, doc) in documents.iter().enumerate() {
            let path = SymbolId(symbols.get_or_intern(&doc.relative_path));
            document_index.insert(path, d);

            for (slot, symbol) in doc.symbols.keys().enumerate() {
                let key = SymbolId(symbols.get_or_intern(symbol));
                symbol_info_index.insert(key, InfoRef { document: d, slot });
                total_symbols += 1;
            }

            for (o, occ) in doc.occurrences.iter().enumerate() {
                if occ.symbol.is_empty() {
                    continue;
                }
                let key = SymbolId(symbols.get_or_intern(&occ.symbol));
                occurrence_index.entry(key).or_default().push(OccurrenceRef {
                    document: d,
                    occurrence: o,
                });
                total_occurrences += 1;
            }
        }

        for (i, info) in external_symbols.iter().enumerate() {
            let key = SymbolId(symbols.get_or_intern(&info.symbol));
            external_index.insert(key, i);
        }

        info!(
            "Index built: {} documents, {} symbols, {} occurrences",
            documents.len(),
            total_symbols,
            total_occurrences
        );
        debug!(
            unique_symbols = occurrence_index.len(),
            inferred_kinds, "occurrence index ready"
        );

        Self {
            inner: Arc::new(CodeIndexInner {
                metadata,
                documents,
                external_symbols,
                symbols: symbols.into_reader(),
                occurrence_index,
                document_index,
                symbol_info_index,
                external_index,
            }),
            call_path_max_depth: DEFAULT_CALL_PATH_MAX_DEPTH,
        }
    }

    /// Limit call-path searches to chains of at most `depth` symbols.
    pub fn with_call_path_max_depth(mut self, depth: usize) -> Self {
        self.call_path_max_depth = depth;
        self
    }

    pub fn call_path_max_depth(&self) -> usize {
        self.call_path_max_depth
    }

    // ---- Read-only accessors ----

    pub fn metadata(&self) -> &Metadata {
        &self.inner.metadata
    }

    pub fn documents(&self) -> &[Document] {
        &self.inner.documents
    }

    pub fn external_symbols(&self) -> &[SymbolInformation] {
        &self.inner.external_symbols
    }

    pub fn external_symbol(&self, symbol: &str) -> Option<&SymbolInformation> {
        let i = self.inner.external_index.get(&self.key(symbol)?)?;
        self.inner.external_symbols.get(*i)
    }

    /// Defined symbols, each paired with its definition metadata, in first
    /// registration order.
    pub fn defined_symbols(&self) -> impl Iterator<Item = (&str, &SymbolInformation)> + '_ {
        self.inner
            .symbol_info_index
            .iter()
            .filter_map(|(id, info_ref)| Some((self.resolve(*id), self.info_at(*info_ref)?)))
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.key(symbol)
            .is_some_and(|id| self.inner.symbol_info_index.contains_key(&id))
    }

    /// Occurrences of every symbol whose line span overlaps `[start_line, end_line]`.
    pub fn symbols_in_range(&self, path: &str, start_line: i32, end_line: i32) -> Vec<&Occurrence> {
        let Some(doc) = self.document(path) else {
            return Vec::new();
        };
        doc.occurrences
            .iter()
            .filter(|occ| occ.to_range().overlaps_lines(start_line, end_line))
            .collect()
    }

    pub fn symbols_at_line(&self, path: &str, line: i32) -> Vec<&Occurrence> {
        self.symbols_in_range(path, line, line)
    }

    /// Occurrences of `symbol`, each paired with the document holding it.
    pub fn located_occurrences(&self, symbol: &str) -> Vec<(&Document, &Occurrence)> {
        self.occurrence_refs(symbol)
            .iter()
            .filter_map(|r| {
                let doc = self.inner.documents.get(r.document)?;
                Some((doc, doc.occurrences.get(r.occurrence)?))
            })
            .collect()
    }

    // ---- Internal helpers ----

    pub(crate) fn key(&self, s: &str) -> Option<SymbolId> {
        self.inner.symbols.get(s).map(SymbolId)
    }

    pub(crate) fn resolve(&self, id: SymbolId) -> &str {
        self.inner.symbols.resolve(&id.0)
    }

    pub(crate) fn occurrence_at(&self, r: OccurrenceRef) -> Option<&Occurrence> {
        self.inner
            .documents
            .get(r.document)?
            .occurrences
            .get(r.occurrence)
    }

    pub(crate) fn info_at(&self, r: InfoRef) -> Option<&SymbolInformation> {
        self.inner
            .documents
            .get(r.document)?
            .symbols
            .get_index(r.slot)
            .map(|(_, info)| info)
    }

    pub(crate) fn occurrence_refs(&self, symbol: &str) -> &[OccurrenceRef] {
        self.key(symbol)
            .and_then(|id| self.inner.occurrence_index.get(&id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Location of the first definition occurrence of `symbol`.
    pub(crate) fn definition_ref(&self, symbol: &str) -> Option<OccurrenceRef> {
        self.occurrence_refs(symbol).iter().copied().find(|r| {
            self.occurrence_at(*r)
                .is_some_and(Occurrence::is_definition)
        })
    }
}

/// Returns true when the kind was inferred rather than provided.
fn resolve_in_place(codec: &SymbolCodec, info: &mut SymbolInformation) -> bool {
    let (resolved, fallback) = codec.resolve_metadata(std::mem::take(info));
    *info = resolved;
    if fallback.kind {
        warn!(
            "SymbolInformation.kind unspecified, inferred from symbol: '{}' -> '{}'",
            info.symbol, info.kind
        );
    }
    fallback.kind
}

impl SymbolLookup for CodeIndex {
    fn document(&self, path: &str) -> Option<&Document> {
        let d = self.inner.document_index.get(&self.key(path)?)?;
        self.inner.documents.get(*d)
    }

    fn symbol_info(&self, symbol: &str) -> Option<&SymbolInformation> {
        let info_ref = self.inner.symbol_info_index.get(&self.key(symbol)?)?;
        self.info_at(*info_ref)
    }

    fn document_by_symbol(&self, symbol: &str) -> Option<&Document> {
        let info_ref = self.inner.symbol_info_index.get(&self.key(symbol)?)?;
        self.inner.documents.get(info_ref.document)
    }

    fn symbol_occurrences(&self, symbol: &str) -> Vec<&Occurrence> {
        self.occurrence_refs(symbol)
            .iter()
            .filter_map(|r| self.occurrence_at(*r))
            .collect()
    }

    fn list_symbols(&self) -> Vec<&str> {
        self.inner
            .occurrence_index
            .keys()
            .map(|id| self.resolve(*id))
            .collect()
    }
}

impl ReferenceAnalyzer for CodeIndex {
    fn find_definition(&self, symbol: &str) -> Option<&Occurrence> {
        let found = self
            .definition_ref(symbol)
            .and_then(|r| self.occurrence_at(r));
        debug!(symbol, found = found.is_some(), "find_definition");
        found
    }

    fn find_references(&self, symbol: &str) -> Vec<&Occurrence> {
        let references: Vec<&Occurrence> = self
            .occurrence_refs(symbol)
            .iter()
            .filter_map(|r| self.occurrence_at(*r))
            .filter(|occ| occ.is_reference())
            .collect();
        debug!(symbol, count = references.len(), "find_references");
        references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sciplens_api::models::{SymbolKind, SymbolRole};

    fn sample() -> Index {
        let a = Document::new("a.py", "python")
            .with_occurrence(Occurrence::new("x.", vec![0, 0, 1], SymbolRole::DEFINITION))
            .with_occurrence(Occurrence::new("", vec![1, 0, 1], SymbolRole::NONE))
            .with_occurrence(Occurrence::new("x.", vec![2, 0, 1], SymbolRole::READ_ACCESS))
            .with_symbol(SymbolInformation::new("x.", SymbolKind::Variable, "x"));
        let b = Document::new("b.py", "python")
            .with_occurrence(Occurrence::new("x.", vec![5, 0, 1], SymbolRole::NONE))
            .with_symbol(SymbolInformation::new("x.", SymbolKind::Constant, "x"));
        Index::new(
            Metadata::default(),
            vec![a, b],
            vec![SymbolInformation::new("ext#", SymbolKind::Class, "Ext")],
        )
    }

    #[test]
    fn test_code_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeIndex>();
    }

    #[test]
    fn test_occurrences_in_document_order() {
        let index = CodeIndex::from_index(sample());
        let lines: Vec<i32> = index
            .symbol_occurrences("x.")
            .iter()
            .map(|o| o.start_line())
            .collect();
        assert_eq!(lines, vec![0, 2, 5]);
        assert_eq!(index.list_symbols(), vec!["x."]);
    }

    #[test]
    fn test_last_defining_document_wins() {
        let index = CodeIndex::from_index(sample());
        assert_eq!(index.document_by_symbol("x.").unwrap().relative_path, "b.py");
        assert_eq!(index.symbol_info("x.").unwrap().kind, SymbolKind::Constant);
        assert_eq!(index.defined_symbols().count(), 1);
    }

    #[test]
    fn test_missing_lookups_are_empty() {
        let index = CodeIndex::from_index(sample());
        assert!(index.document("nope.py").is_none());
        assert!(index.symbol_info("nope.").is_none());
        assert!(index.find_definition("nope.").is_none());
        assert!(index.symbol_occurrences("nope.").is_empty());
        assert!(index.symbols_in_range("nope.py", 0, 10).is_empty());
    }

    #[test]
    fn test_external_symbols_are_separate() {
        let index = CodeIndex::from_index(sample());
        assert_eq!(index.external_symbol("ext#").unwrap().display_name, "Ext");
        assert!(index.symbol_info("ext#").is_none());
    }

    #[test]
    fn test_symbols_at_line() {
        let index = CodeIndex::from_index(sample());
        let at = index.symbols_at_line("a.py", 2);
        assert_eq!(at.len(), 1);
        assert_eq!(at[0].symbol, "x.");
        assert_eq!(index.symbols_in_range("a.py", 0, 2).len(), 3);

        let paths: Vec<&str> = index
            .located_occurrences("x.")
            .iter()
            .map(|(doc, _)| doc.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["a.py", "a.py", "b.py"]);
    }

    #[test]
    fn test_clone_shares_data() {
        let index = CodeIndex::from_index(sample());
        let clone = index.clone().with_call_path_max_depth(3);
        assert!(std::ptr::eq(index.documents(), clone.documents()));
        assert_eq!(clone.call_path_max_depth(), 3);
        assert_eq!(index.call_path_max_depth(), DEFAULT_CALL_PATH_MAX_DEPTH);
    }
}
