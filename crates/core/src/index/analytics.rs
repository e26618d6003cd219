use super::code_index::CodeIndex;
use crate::config::DEFAULT_DEAD_CODE_EXCLUDES;
use crate::error::Result;
use crate::pattern;
use indexmap::IndexMap;
use sciplens_api::models::{Document, SymbolInformation, SymbolKind};
use sciplens_api::semantic::{ReferenceAnalyzer, SymbolLookup};
use serde::Serialize;
use tracing::debug;

/// Definition counts and body lengths, measured in lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComplexityReport {
    pub function_count: usize,
    pub class_count: usize,
    pub avg_function_length: f64,
    pub max_function_length: i32,
}

/// A defined symbol flattened together with the document defining it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionEntry<'a> {
    pub symbol: &'a str,
    pub display_name: &'a str,
    pub kind: SymbolKind,
    pub kind_name: &'static str,
    pub document: &'a str,
    pub language: &'a str,
    pub documentation: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndexStatistics {
    pub total_documents: usize,
    pub total_symbols: usize,
    pub total_occurrences: usize,
    pub language_distribution: IndexMap<String, usize>,
    pub kind_distribution: IndexMap<String, usize>,
}

impl CodeIndex {
    /// Complexity over every document, or over the single document at `path`.
    pub fn analyze_complexity(&self, path: Option<&str>) -> ComplexityReport {
        let docs: Vec<&Document> = match path {
            Some(path) => self.document(path).into_iter().collect(),
            None => self.documents().iter().collect(),
        };

        let mut lengths: Vec<i32> = Vec::new();
        let mut class_count = 0;
        for doc in docs {
            for (symbol, info) in &doc.symbols {
                if info.kind == SymbolKind::Class {
                    class_count += 1;
                } else if info.kind.is_function_like() {
                    if let Some(definition) = self.find_definition(symbol) {
                        lengths.push(definition.end_line() - definition.start_line() + 1);
                    }
                }
            }
        }

        let avg_function_length = if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().map(|l| f64::from(*l)).sum::<f64>() / lengths.len() as f64
        };

        ComplexityReport {
            function_count: lengths.len(),
            class_count,
            avg_function_length,
            max_function_length: lengths.iter().copied().max().unwrap_or(0),
        }
    }

    /// The `n` defined symbols with the most references, highest first.
    ///
    /// Ties keep first-seen order. When fewer than `n` defined symbols are
    /// referenced, unreferenced ones fill the list with a count of zero.
    pub fn find_hotspots(&self, n: usize) -> Vec<(&str, usize)> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for doc in self.documents() {
            for occ in &doc.occurrences {
                if occ.is_reference() && !occ.symbol.is_empty() {
                    *counts.entry(occ.symbol.as_str()).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts
            .iter()
            .filter(|(symbol, _)| self.is_defined(symbol))
            .map(|(symbol, count)| (*symbol, *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        if ranked.len() < n {
            for (symbol, _) in self.defined_symbols() {
                if ranked.len() >= n {
                    break;
                }
                if !counts.contains_key(symbol) {
                    ranked.push((symbol, 0));
                }
            }
        }

        ranked.truncate(n);
        ranked
    }

    /// Defined symbols without a single reference.
    ///
    /// Symbols matching any of the glob `excludes` are skipped. `None` or an
    /// empty list falls back to `*__init__*`, `*main*`, `*test*` and `*Test*`.
    pub fn find_dead_code(&self, excludes: Option<&[&str]>) -> Result<Vec<&str>> {
        let excludes = match excludes {
            Some(patterns) if !patterns.is_empty() => patterns,
            _ => DEFAULT_DEAD_CODE_EXCLUDES,
        };
        let excluded = pattern::glob_set(excludes)?;

        let mut dead = Vec::new();
        for doc in self.documents() {
            for symbol in doc.symbols.keys() {
                if excluded.is_match(symbol.as_str()) {
                    continue;
                }
                if self.find_references(symbol).is_empty() {
                    dead.push(symbol.as_str());
                }
            }
        }
        debug!(count = dead.len(), "find_dead_code");
        Ok(dead)
    }

    /// Non-local defined symbols whose display name is not `_private`.
    /// Dunder names such as `__init__` still count as exported.
    pub fn exported_symbols(&self) -> Vec<&SymbolInformation> {
        let mut exported = Vec::new();
        for doc in self.documents() {
            for (symbol, info) in &doc.symbols {
                if symbol.starts_with("local ") {
                    continue;
                }
                let name = info.display_name.as_str();
                if name.starts_with('_') && !name.starts_with("__") {
                    continue;
                }
                exported.push(info);
            }
        }
        exported
    }

    pub fn all_definitions(&self) -> Vec<DefinitionEntry<'_>> {
        let mut entries = Vec::new();
        for doc in self.documents() {
            for (symbol, info) in &doc.symbols {
                entries.push(DefinitionEntry {
                    symbol,
                    display_name: &info.display_name,
                    kind: info.kind,
                    kind_name: info.kind.name(),
                    document: &doc.relative_path,
                    language: &doc.language,
                    documentation: &info.documentation,
                });
            }
        }
        entries
    }

    pub fn definitions_by_kind(&self, kind: SymbolKind) -> Vec<DefinitionEntry<'_>> {
        self.definitions_by_kinds(&[kind])
    }

    pub fn definitions_by_kinds(&self, kinds: &[SymbolKind]) -> Vec<DefinitionEntry<'_>> {
        self.all_definitions()
            .into_iter()
            .filter(|d| kinds.contains(&d.kind))
            .collect()
    }

    /// Case-insensitive match on the document language.
    pub fn definitions_by_language(&self, language: &str) -> Vec<DefinitionEntry<'_>> {
        self.all_definitions()
            .into_iter()
            .filter(|d| d.language.eq_ignore_ascii_case(language))
            .collect()
    }

    pub fn functions(&self) -> Vec<DefinitionEntry<'_>> {
        self.definitions_by_kind(SymbolKind::Function)
    }

    pub fn methods(&self) -> Vec<DefinitionEntry<'_>> {
        self.definitions_by_kind(SymbolKind::Method)
    }

    pub fn classes(&self) -> Vec<DefinitionEntry<'_>> {
        self.definitions_by_kind(SymbolKind::Class)
    }

    pub fn interfaces(&self) -> Vec<DefinitionEntry<'_>> {
        self.definitions_by_kind(SymbolKind::Interface)
    }

    pub fn statistics(&self) -> IndexStatistics {
        let mut stats = IndexStatistics {
            total_documents: self.documents().len(),
            ..Default::default()
        };
        for doc in self.documents() {
            stats.total_symbols += doc.symbols.len();
            stats.total_occurrences += doc.occurrences.len();
            *stats
                .language_distribution
                .entry(doc.language.clone())
                .or_default() += 1;
            for info in doc.symbols.values() {
                *stats
                    .kind_distribution
                    .entry(info.kind.name().to_string())
                    .or_default() += 1;
            }
        }
        stats
    }

    /// Defined symbols by display name, exact or substring.
    pub fn find_symbols_by_name(&self, name: &str, exact: bool) -> Vec<&SymbolInformation> {
        self.defined_symbols()
            .map(|(_, info)| info)
            .filter(|info| {
                if exact {
                    info.display_name == name
                } else {
                    info.display_name.contains(name)
                }
            })
            .collect()
    }

    /// Case-insensitive substring search over display names and raw symbols.
    pub fn search_symbols(&self, query: &str) -> Vec<&SymbolInformation> {
        let query = query.to_lowercase();
        self.defined_symbols()
            .map(|(_, info)| info)
            .filter(|info| {
                info.display_name.to_lowercase().contains(&query)
                    || info.symbol.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Defined symbols whose display name matches a glob.
    pub fn find_symbols_by_pattern(&self, glob: &str) -> Result<Vec<&SymbolInformation>> {
        let matcher = pattern::glob_matcher(glob)?;
        Ok(self
            .documents()
            .iter()
            .flat_map(|doc| doc.symbols.values())
            .filter(|info| matcher.is_match(info.display_name.as_str()))
            .collect())
    }
}
