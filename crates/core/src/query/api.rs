use super::filter::{
    AndFilter, CustomFilter, DocumentFilter, DocumentationFilter, KindFilter, LanguageFilter,
    NameFilter, OrFilter, PatternFilter, RoleFilter, SymbolFilter,
};
use crate::error::Result;
use crate::index::CodeIndex;
use indexmap::IndexMap;
use sciplens_api::models::{Document, Occurrence, SymbolInformation, SymbolKind, SymbolRole};
use sciplens_api::semantic::{HierarchyAnalyzer, HierarchyDirection, ReferenceAnalyzer};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryStats {
    pub count: usize,
    /// Kind name -> number of matching symbols, in first-seen order
    pub kind_distribution: IndexMap<String, usize>,
}

/// Chainable query over the symbols defined in each document.
///
/// Filters are combined with AND. Results follow document order, then the
/// order of each document's symbol table.
pub struct QueryApi<'a> {
    index: &'a CodeIndex,
    filters: AndFilter,
}

impl<'a> QueryApi<'a> {
    pub fn new(index: &'a CodeIndex) -> Self {
        Self {
            index,
            filters: AndFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: impl SymbolFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn by_kind(self, kind: SymbolKind) -> Self {
        self.with_filter(KindFilter::new(kind))
    }

    pub fn by_language(self, language: &str) -> Self {
        self.with_filter(LanguageFilter::new(language))
    }

    pub fn by_name(self, name: &str, exact: bool) -> Self {
        self.with_filter(NameFilter::new(name, exact))
    }

    pub fn by_pattern(self, pattern: &str, use_regex: bool) -> Result<Self> {
        Ok(self.with_filter(PatternFilter::new(pattern, use_regex)?))
    }

    pub fn by_document(self, path: &str) -> Result<Self> {
        Ok(self.with_filter(DocumentFilter::new(path)?))
    }

    /// Matches symbols in any of the given document globs.
    pub fn by_documents<S: AsRef<str>>(self, paths: &[S]) -> Result<Self> {
        let mut filters: Vec<Box<dyn SymbolFilter>> = Vec::with_capacity(paths.len());
        for path in paths {
            filters.push(Box::new(DocumentFilter::new(path.as_ref())?));
        }
        Ok(self.with_filter(OrFilter::new(filters)))
    }

    pub fn has_documentation(self) -> Self {
        self.with_filter(DocumentationFilter::new(true))
    }

    /// Symbols whose definition occurrence carries the Definition role.
    pub fn is_exported(self) -> Self {
        self.with_role(SymbolRole::DEFINITION)
    }

    pub fn with_role(self, role: SymbolRole) -> Self {
        self.with_filter(RoleFilter::new(role))
    }

    pub fn custom_filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&SymbolInformation, Option<&Document>, Option<&CodeIndex>) -> bool
            + Send
            + Sync
            + 'static,
    {
        self.with_filter(CustomFilter::new(predicate))
    }

    fn matching(&self) -> impl Iterator<Item = (&'a Document, &'a SymbolInformation)> + '_ {
        let exact = self.filters.exact_name();
        let index = self.index;
        index.documents().iter().flat_map(move |doc| {
            doc.symbols
                .values()
                .filter(move |info| exact.is_none_or(|name| info.display_name == name))
                .filter(move |info| self.filters.matches(info, Some(doc), Some(index)))
                .map(move |info| (doc, info))
        })
    }

    pub fn execute(&self) -> Vec<&'a SymbolInformation> {
        debug!(filters = self.filters.len(), "executing query");
        let results: Vec<_> = self.matching().map(|(_, info)| info).collect();
        debug!(count = results.len(), "query done");
        results
    }

    pub fn count(&self) -> usize {
        self.matching().count()
    }

    pub fn first(&self) -> Option<&'a SymbolInformation> {
        self.matching().next().map(|(_, info)| info)
    }

    pub fn exists(&self) -> bool {
        self.matching().next().is_some()
    }

    pub fn group_by_kind(&self) -> IndexMap<SymbolKind, Vec<&'a SymbolInformation>> {
        let mut groups: IndexMap<SymbolKind, Vec<&'a SymbolInformation>> = IndexMap::new();
        for (_, info) in self.matching() {
            groups.entry(info.kind).or_default().push(info);
        }
        groups
    }

    pub fn group_by_document(&self) -> IndexMap<&'a str, Vec<&'a SymbolInformation>> {
        let mut groups: IndexMap<&'a str, Vec<&'a SymbolInformation>> = IndexMap::new();
        for (doc, info) in self.matching() {
            groups
                .entry(doc.relative_path.as_str())
                .or_default()
                .push(info);
        }
        groups
    }

    pub fn aggregate_stats(&self) -> QueryStats {
        let mut stats = QueryStats::default();
        for (_, info) in self.matching() {
            stats.count += 1;
            *stats
                .kind_distribution
                .entry(info.kind.name().to_string())
                .or_default() += 1;
        }
        stats
    }

    pub fn find_references(&self, symbol: &str) -> Vec<&'a Occurrence> {
        debug!(symbol, "QueryApi::find_references");
        self.index.find_references(symbol)
    }

    pub fn find_implementations(&self, symbol: &str) -> Vec<&'a str> {
        debug!(symbol, "QueryApi::find_implementations");
        self.index.find_implementations(symbol)
    }

    pub fn find_hierarchy(&self, symbol: &str, direction: HierarchyDirection) -> Vec<&'a str> {
        self.index.find_hierarchy(symbol, direction)
    }
}

impl CodeIndex {
    pub fn query(&self) -> QueryApi<'_> {
        QueryApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuild;
    use sciplens_api::models::{Index, Metadata};

    fn index() -> CodeIndex {
        let mut documented = SymbolInformation::new("m/load().", SymbolKind::Function, "load");
        documented.documentation.push("Loads things.".to_string());

        let a = Document::new("src/a.py", "python")
            .with_occurrence(Occurrence::new("m/load().", vec![0, 0, 4], SymbolRole::DEFINITION))
            .with_symbol(documented)
            .with_symbol(SymbolInformation::new("m/Store#", SymbolKind::Class, "Store"));
        let b = Document::new("lib/b.rs", "rust")
            .with_symbol(SymbolInformation::new("n/load().", SymbolKind::Method, "load"));
        Index::new(Metadata::default(), vec![a, b], vec![]).build()
    }

    #[test]
    fn test_execute_with_exact_name() {
        let index = index();
        let names: Vec<&str> = index
            .query()
            .by_name("load", true)
            .execute()
            .iter()
            .map(|i| i.symbol.as_str())
            .collect();
        assert_eq!(names, vec!["m/load().", "n/load()."]);
    }

    #[test]
    fn test_chained_filters() {
        let index = index();
        assert_eq!(index.query().by_language("Python").count(), 2);
        assert_eq!(index.query().by_kind(SymbolKind::Class).first().unwrap().display_name, "Store");
        assert_eq!(index.query().has_documentation().count(), 1);
        // only m/load(). has a definition occurrence
        assert_eq!(index.query().is_exported().count(), 1);
        assert!(!index.query().by_name("missing", true).exists());
        assert_eq!(index.query().by_pattern("^S", true).unwrap().count(), 1);
        assert_eq!(index.query().by_document("lib/*").unwrap().count(), 1);
        assert_eq!(
            index
                .query()
                .by_documents(&["lib/*", "src/*"])
                .unwrap()
                .count(),
            3
        );
        assert_eq!(
            index
                .query()
                .custom_filter(|info, _, _| info.display_name.starts_with('S'))
                .count(),
            1
        );
    }

    #[test]
    fn test_grouping_and_stats() {
        let index = index();
        let by_kind = index.query().group_by_kind();
        assert_eq!(by_kind[&SymbolKind::Function].len(), 1);
        assert_eq!(by_kind.keys().next(), Some(&SymbolKind::Function));

        let by_doc = index.query().group_by_document();
        assert_eq!(by_doc["src/a.py"].len(), 2);
        assert_eq!(by_doc["lib/b.rs"].len(), 1);

        let stats = index.query().aggregate_stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.kind_distribution["Class"], 1);
    }

    #[test]
    fn test_invalid_patterns_are_errors() {
        let index = index();
        assert!(index.query().by_pattern("(", true).is_err());
        assert!(index.query().by_document("[").is_err());
    }
}
