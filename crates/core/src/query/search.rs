use crate::index::CodeIndex;
use indexmap::IndexMap;
use sciplens_api::models::SymbolInformation;

/// Name-based lookups over the symbols defined in each document.
#[derive(Clone, Copy)]
pub struct SymbolSearcher<'a> {
    index: &'a CodeIndex,
}

impl<'a> SymbolSearcher<'a> {
    pub fn new(index: &'a CodeIndex) -> Self {
        Self { index }
    }

    /// Case-insensitive substring match on display names and raw symbols.
    pub fn search(&self, query: &str) -> Vec<&'a SymbolInformation> {
        self.index.search_symbols(query)
    }

    /// Symbols whose display name scores at least `cutoff` in normalized
    /// Levenshtein similarity, best names first.
    ///
    /// `limit` caps distinct names, and every symbol sharing a selected name
    /// is returned.
    pub fn fuzzy_search(&self, query: &str, limit: usize, cutoff: f64) -> Vec<&'a SymbolInformation> {
        let mut by_name: IndexMap<&'a str, Vec<&'a SymbolInformation>> = IndexMap::new();
        for info in self.all() {
            by_name.entry(info.display_name.as_str()).or_default().push(info);
        }

        let mut scored: Vec<(&'a str, f64)> = by_name
            .keys()
            .map(|name| (*name, strsim::normalized_levenshtein(query, name)))
            .filter(|(_, score)| *score >= cutoff)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        scored
            .into_iter()
            .filter_map(|(name, _)| by_name.get(name))
            .flatten()
            .copied()
            .collect()
    }

    /// Case-insensitive prefix match, sorted by display name.
    pub fn autocomplete(&self, prefix: &str, limit: usize) -> Vec<&'a SymbolInformation> {
        let prefix = prefix.to_lowercase();
        let mut found: Vec<&'a SymbolInformation> = self
            .all()
            .filter(|info| info.display_name.to_lowercase().starts_with(&prefix))
            .collect();
        found.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        found.truncate(limit);
        found
    }

    fn all(&self) -> impl Iterator<Item = &'a SymbolInformation> {
        self.index
            .documents()
            .iter()
            .flat_map(|doc| doc.symbols.values())
    }
}

impl CodeIndex {
    pub fn searcher(&self) -> SymbolSearcher<'_> {
        SymbolSearcher::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuild;
    use sciplens_api::models::{Document, Index, Metadata, SymbolKind};

    fn index() -> CodeIndex {
        let a = Document::new("a.py", "python")
            .with_symbol(SymbolInformation::new("a/parse().", SymbolKind::Function, "parse"))
            .with_symbol(SymbolInformation::new("a/Parser#", SymbolKind::Class, "Parser"))
            .with_symbol(SymbolInformation::new("a/format().", SymbolKind::Function, "format"));
        let b = Document::new("b.py", "python")
            .with_symbol(SymbolInformation::new("b/parse().", SymbolKind::Function, "parse"));
        Index::new(Metadata::default(), vec![a, b], vec![]).build()
    }

    #[test]
    fn test_fuzzy_search_groups_by_name() {
        let index = index();
        let found = index.searcher().fuzzy_search("pars", 1, 0.6);
        let symbols: Vec<&str> = found.iter().map(|i| i.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["a/parse().", "b/parse()."]);

        assert!(index.searcher().fuzzy_search("zzzz", 10, 0.6).is_empty());
        assert!(index.searcher().fuzzy_search("parse", 0, 0.0).is_empty());
    }

    #[test]
    fn test_autocomplete_sorted_and_limited() {
        let index = index();
        let names: Vec<&str> = index
            .searcher()
            .autocomplete("PA", 10)
            .iter()
            .map(|i| i.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Parser", "parse", "parse"]);
        assert_eq!(index.searcher().autocomplete("pa", 1).len(), 1);
    }

    #[test]
    fn test_search_delegates_to_index() {
        let index = index();
        // "Parser" also contains the query once lowercased
        assert_eq!(index.searcher().search("PARSE").len(), 3);
    }
}
