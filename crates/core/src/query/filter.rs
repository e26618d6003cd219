//! Composable predicates over defined symbols.

use crate::error::Result;
use crate::index::CodeIndex;
use crate::pattern;
use globset::GlobMatcher;
use regex::Regex;
use sciplens_api::models::{Document, SymbolInformation, SymbolKind, SymbolRole};
use sciplens_api::semantic::{ReferenceAnalyzer, SymbolLookup};

pub trait SymbolFilter: Send + Sync {
    fn matches(
        &self,
        symbol: &SymbolInformation,
        document: Option<&Document>,
        index: Option<&CodeIndex>,
    ) -> bool;

    /// Display name the filter requires verbatim, if any. Lets a query skip
    /// symbols without running the full predicate.
    fn exact_name(&self) -> Option<&str> {
        None
    }
}

impl<F: SymbolFilter + ?Sized> SymbolFilter for Box<F> {
    fn matches(
        &self,
        symbol: &SymbolInformation,
        document: Option<&Document>,
        index: Option<&CodeIndex>,
    ) -> bool {
        (**self).matches(symbol, document, index)
    }

    fn exact_name(&self) -> Option<&str> {
        (**self).exact_name()
    }
}

enum NameMatcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

/// Glob over the display name, or a regex found anywhere in it.
pub struct PatternFilter {
    matcher: NameMatcher,
}

impl PatternFilter {
    pub fn glob(pattern: &str) -> Result<Self> {
        Ok(Self {
            matcher: NameMatcher::Glob(pattern::glob_matcher(pattern)?),
        })
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Self {
            matcher: NameMatcher::Regex(Regex::new(pattern)?),
        })
    }

    pub fn new(pattern: &str, use_regex: bool) -> Result<Self> {
        if use_regex {
            Self::regex(pattern)
        } else {
            Self::glob(pattern)
        }
    }
}

impl SymbolFilter for PatternFilter {
    fn matches(&self, symbol: &SymbolInformation, _: Option<&Document>, _: Option<&CodeIndex>) -> bool {
        match &self.matcher {
            NameMatcher::Glob(glob) => glob.is_match(symbol.display_name.as_str()),
            NameMatcher::Regex(regex) => regex.is_match(&symbol.display_name),
        }
    }
}

/// Glob over the relative path of the document being scanned.
pub struct DocumentFilter {
    matcher: GlobMatcher,
}

impl DocumentFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            matcher: pattern::glob_matcher(pattern)?,
        })
    }
}

impl SymbolFilter for DocumentFilter {
    fn matches(&self, _: &SymbolInformation, document: Option<&Document>, _: Option<&CodeIndex>) -> bool {
        document.is_some_and(|doc| self.matcher.is_match(doc.relative_path.as_str()))
    }
}

/// Checks the roles of the symbol's definition occurrence.
pub struct RoleFilter {
    role: SymbolRole,
}

impl RoleFilter {
    pub fn new(role: SymbolRole) -> Self {
        Self { role }
    }
}

impl SymbolFilter for RoleFilter {
    fn matches(&self, symbol: &SymbolInformation, _: Option<&Document>, index: Option<&CodeIndex>) -> bool {
        index
            .and_then(|index| index.find_definition(&symbol.symbol))
            .is_some_and(|definition| definition.symbol_roles.intersects(self.role))
    }
}

pub struct KindFilter {
    kind: SymbolKind,
}

impl KindFilter {
    pub fn new(kind: SymbolKind) -> Self {
        Self { kind }
    }
}

impl SymbolFilter for KindFilter {
    fn matches(&self, symbol: &SymbolInformation, _: Option<&Document>, _: Option<&CodeIndex>) -> bool {
        symbol.kind == self.kind
    }
}

pub struct NameFilter {
    name: String,
    exact: bool,
}

impl NameFilter {
    pub fn new(name: impl Into<String>, exact: bool) -> Self {
        Self {
            name: name.into(),
            exact,
        }
    }
}

impl SymbolFilter for NameFilter {
    fn matches(&self, symbol: &SymbolInformation, _: Option<&Document>, _: Option<&CodeIndex>) -> bool {
        if self.exact {
            symbol.display_name == self.name
        } else {
            symbol.display_name.contains(&self.name)
        }
    }

    fn exact_name(&self) -> Option<&str> {
        self.exact.then_some(self.name.as_str())
    }
}

/// Case-insensitive match on the document language.
pub struct LanguageFilter {
    language: String,
}

impl LanguageFilter {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_lowercase(),
        }
    }
}

impl SymbolFilter for LanguageFilter {
    fn matches(&self, _: &SymbolInformation, document: Option<&Document>, _: Option<&CodeIndex>) -> bool {
        document.is_some_and(|doc| doc.language.to_lowercase() == self.language)
    }
}

pub struct DocumentationFilter {
    has_documentation: bool,
}

impl DocumentationFilter {
    pub fn new(has_documentation: bool) -> Self {
        Self { has_documentation }
    }
}

impl SymbolFilter for DocumentationFilter {
    fn matches(&self, symbol: &SymbolInformation, _: Option<&Document>, _: Option<&CodeIndex>) -> bool {
        symbol.has_documentation() == self.has_documentation
    }
}

/// Bounds, both inclusive, on the number of occurrences of a symbol.
pub struct OccurrenceCountFilter {
    min: Option<usize>,
    max: Option<usize>,
}

impl OccurrenceCountFilter {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }
}

impl SymbolFilter for OccurrenceCountFilter {
    fn matches(&self, symbol: &SymbolInformation, _: Option<&Document>, index: Option<&CodeIndex>) -> bool {
        let Some(index) = index else {
            return false;
        };
        let count = index.symbol_occurrences(&symbol.symbol).len();
        self.min.is_none_or(|min| count >= min) && self.max.is_none_or(|max| count <= max)
    }
}

type Predicate =
    dyn Fn(&SymbolInformation, Option<&Document>, Option<&CodeIndex>) -> bool + Send + Sync;

pub struct CustomFilter {
    predicate: Box<Predicate>,
}

impl CustomFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&SymbolInformation, Option<&Document>, Option<&CodeIndex>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl SymbolFilter for CustomFilter {
    fn matches(
        &self,
        symbol: &SymbolInformation,
        document: Option<&Document>,
        index: Option<&CodeIndex>,
    ) -> bool {
        (self.predicate)(symbol, document, index)
    }
}

/// All filters match. Empty is true.
#[derive(Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn SymbolFilter>>,
}

impl AndFilter {
    pub fn new(filters: Vec<Box<dyn SymbolFilter>>) -> Self {
        Self { filters }
    }

    pub fn push(&mut self, filter: Box<dyn SymbolFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl SymbolFilter for AndFilter {
    fn matches(
        &self,
        symbol: &SymbolInformation,
        document: Option<&Document>,
        index: Option<&CodeIndex>,
    ) -> bool {
        self.filters
            .iter()
            .all(|f| f.matches(symbol, document, index))
    }

    fn exact_name(&self) -> Option<&str> {
        self.filters.iter().find_map(|f| f.exact_name())
    }
}

/// Any filter matches. Empty is false.
#[derive(Default)]
pub struct OrFilter {
    filters: Vec<Box<dyn SymbolFilter>>,
}

impl OrFilter {
    pub fn new(filters: Vec<Box<dyn SymbolFilter>>) -> Self {
        Self { filters }
    }
}

impl SymbolFilter for OrFilter {
    fn matches(
        &self,
        symbol: &SymbolInformation,
        document: Option<&Document>,
        index: Option<&CodeIndex>,
    ) -> bool {
        self.filters
            .iter()
            .any(|f| f.matches(symbol, document, index))
    }
}

pub struct NotFilter {
    filter: Box<dyn SymbolFilter>,
}

impl NotFilter {
    pub fn new(filter: Box<dyn SymbolFilter>) -> Self {
        Self { filter }
    }
}

impl SymbolFilter for NotFilter {
    fn matches(
        &self,
        symbol: &SymbolInformation,
        document: Option<&Document>,
        index: Option<&CodeIndex>,
    ) -> bool {
        !self.filter.matches(symbol, document, index)
    }
}
