//! Type hierarchy and call relations inferred from the index.
//!
//! Callees and callers use different scope proxies. Callees are the
//! references whose lines overlap the caller's definition occurrence, while
//! callers are found through the enclosing range recorded on each reference.
//! The two are not guaranteed to agree.

use super::code_index::CodeIndex;
use indexmap::IndexSet;
use sciplens_api::models::RelationshipKind;
use sciplens_api::semantic::{CallHierarchyAnalyzer, HierarchyAnalyzer, SymbolLookup};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

impl HierarchyAnalyzer for CodeIndex {
    fn find_implementations(&self, symbol: &str) -> Vec<&str> {
        let mut found = Vec::new();
        for (_, info) in self.defined_symbols() {
            for rel in &info.relationships {
                if rel.is_implementation && rel.symbol == symbol {
                    found.push(info.symbol.as_str());
                }
            }
        }
        found
    }

    fn find_subtypes(&self, symbol: &str) -> Vec<&str> {
        self.find_implementations(symbol)
    }

    fn find_supertypes(&self, symbol: &str) -> Vec<&str> {
        self.symbol_info(symbol)
            .map(|info| info.related(RelationshipKind::Implementation))
            .unwrap_or_default()
    }
}

impl CallHierarchyAnalyzer for CodeIndex {
    fn find_callees(&self, symbol: &str) -> Vec<&str> {
        let Some(def_ref) = self.definition_ref(symbol) else {
            return Vec::new();
        };
        let Some(doc) = self.documents().get(def_ref.document) else {
            return Vec::new();
        };
        let Some(definition) = doc.occurrences.get(def_ref.occurrence) else {
            return Vec::new();
        };
        let (start, end) = (definition.start_line(), definition.end_line());

        let callees: IndexSet<&str> = doc
            .occurrences
            .iter()
            .filter(|occ| {
                occ.is_reference()
                    && !occ.symbol.is_empty()
                    && occ.symbol != symbol
                    && occ.to_range().overlaps_lines(start, end)
            })
            .map(|occ| occ.symbol.as_str())
            .collect();

        debug!(symbol, count = callees.len(), "find_callees");
        callees.into_iter().collect()
    }

    fn find_callers(&self, symbol: &str) -> Vec<&str> {
        let mut callers: IndexSet<&str> = IndexSet::new();

        for r in self.occurrence_refs(symbol) {
            let Some(doc) = self.documents().get(r.document) else {
                continue;
            };
            let Some(occ) = doc.occurrences.get(r.occurrence) else {
                continue;
            };
            if !occ.is_reference() {
                continue;
            }
            let Some(line) = occ.enclosing_start_line() else {
                continue;
            };
            let caller = doc
                .occurrences
                .iter()
                .find(|candidate| candidate.is_definition() && candidate.start_line() == line);
            if let Some(caller) = caller.filter(|c| !c.symbol.is_empty()) {
                callers.insert(caller.symbol.as_str());
            }
        }

        debug!(symbol, count = callers.len(), "find_callers");
        callers.into_iter().collect()
    }

    fn call_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let max_depth = self.call_path_max_depth();
        let mut queue: VecDeque<(String, Vec<String>)> = VecDeque::new();
        queue.push_back((from.to_string(), vec![from.to_string()]));
        let mut visited: HashSet<String> = HashSet::from([from.to_string()]);

        while let Some((current, path)) = queue.pop_front() {
            if path.len() > max_depth {
                continue;
            }
            if current == to {
                return Some(path);
            }

            for callee in self.find_callees(&current) {
                if callee == to {
                    let mut found = path.clone();
                    found.push(callee.to_string());
                    return Some(found);
                }
                if visited.insert(callee.to_string()) {
                    let mut next = path.clone();
                    next.push(callee.to_string());
                    queue.push_back((callee.to_string(), next));
                }
            }
        }

        debug!(from, to, max_depth, "no call path");
        None
    }
}
