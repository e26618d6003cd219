use super::code_index::CodeIndex;
use sciplens_api::models::Occurrence;
use sciplens_api::semantic::SymbolLookup;
use serde::Serialize;

/// A reference to a callee inside the document defining its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallSite<'a> {
    pub document_path: &'a str,
    pub occurrence: &'a Occurrence,
    /// 0-based start line of the reference
    pub line_number: i32,
}

/// Locates where a caller invokes a callee.
///
/// The search is limited to the caller's defining document and does not
/// check that the reference sits inside the caller's body.
#[derive(Clone, Copy)]
pub struct CallSiteLocator<'a> {
    index: &'a CodeIndex,
}

impl<'a> CallSiteLocator<'a> {
    pub fn new(index: &'a CodeIndex) -> Self {
        Self { index }
    }

    pub fn find_call_site(&self, caller: &str, callee: &str) -> Option<CallSite<'a>> {
        self.sites(caller, callee).next()
    }

    pub fn find_all_call_sites(&self, caller: &str, callee: &str) -> Vec<CallSite<'a>> {
        self.sites(caller, callee).collect()
    }

    /// Call sites whose start line lies in `[start_line, end_line]`.
    pub fn find_call_sites_in_range(
        &self,
        caller: &str,
        callee: &str,
        start_line: i32,
        end_line: i32,
    ) -> Vec<CallSite<'a>> {
        self.sites(caller, callee)
            .filter(|site| (start_line..=end_line).contains(&site.line_number))
            .collect()
    }

    fn sites(&self, caller: &str, callee: &str) -> impl Iterator<Item = CallSite<'a>> {
        let doc = self.index.document_by_symbol(caller);
        doc.into_iter().flat_map(move |doc| {
            doc.occurrences
                .iter()
                .filter(move |occ| occ.symbol == callee && occ.is_reference())
                .map(move |occ| CallSite {
                    document_path: doc.relative_path.as_str(),
                    occurrence: occ,
                    line_number: occ.start_line(),
                })
        })
    }
}

impl CodeIndex {
    pub fn call_sites(&self) -> CallSiteLocator<'_> {
        CallSiteLocator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sciplens_api::models::{Document, Index, Metadata, SymbolInformation, SymbolKind, SymbolRole};

    fn index() -> CodeIndex {
        let doc = Document::new("main.py", "python")
            .with_occurrence(Occurrence::new("foo().", vec![0, 0, 10, 0], SymbolRole::DEFINITION))
            .with_occurrence(Occurrence::new("bar().", vec![2, 4, 7], SymbolRole::READ_ACCESS))
            .with_occurrence(Occurrence::new("bar().", vec![5, 4, 7], SymbolRole::NONE))
            .with_occurrence(Occurrence::new("bar().", vec![20, 0, 3], SymbolRole::DEFINITION))
            .with_symbol(SymbolInformation::new("foo().", SymbolKind::Function, "foo"))
            .with_symbol(SymbolInformation::new("bar().", SymbolKind::Function, "bar"));
        CodeIndex::from_index(Index::new(Metadata::default(), vec![doc], vec![]))
    }

    #[test]
    fn test_find_call_sites() {
        let index = index();
        let locator = index.call_sites();

        let first = locator.find_call_site("foo().", "bar().").unwrap();
        assert_eq!(first.document_path, "main.py");
        assert_eq!(first.line_number, 2);

        let lines: Vec<i32> = locator
            .find_all_call_sites("foo().", "bar().")
            .iter()
            .map(|s| s.line_number)
            .collect();
        assert_eq!(lines, vec![2, 5]);

        assert_eq!(locator.find_call_sites_in_range("foo().", "bar().", 3, 9).len(), 1);
    }

    #[test]
    fn test_unknown_caller_has_no_sites() {
        let index = index();
        let locator = CallSiteLocator::new(&index);
        assert!(locator.find_call_site("nope().", "bar().").is_none());
        assert!(locator.find_all_call_sites("foo().", "baz().").is_empty());
    }
}
