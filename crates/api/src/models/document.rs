use super::kind::{PositionEncoding, SymbolKind};
use super::occurrence::Occurrence;
use super::util::symbol_table;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tagged view of a relationship flag.
///
/// `Implementation` covers both "implements interface" and "inherits from
/// class"; the index format does not tell them apart.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Reference,
    Implementation,
    TypeDefinition,
    Definition,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationshipKind::Reference => "reference",
            RelationshipKind::Implementation => "implementation",
            RelationshipKind::TypeDefinition => "type_definition",
            RelationshipKind::Definition => "definition",
        };
        f.write_str(s)
    }
}

/// Edge from a symbol to another symbol. The flags are independent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Relationship {
    pub symbol: String,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(default)]
    pub is_implementation: bool,
    #[serde(default)]
    pub is_type_definition: bool,
    #[serde(default)]
    pub is_definition: bool,
}

impl Relationship {
    pub fn implementation(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            is_implementation: true,
            ..Default::default()
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = RelationshipKind> + '_ {
        [
            (self.is_reference, RelationshipKind::Reference),
            (self.is_implementation, RelationshipKind::Implementation),
            (self.is_type_definition, RelationshipKind::TypeDefinition),
            (self.is_definition, RelationshipKind::Definition),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, kind)| kind)
    }

    pub fn has(&self, kind: RelationshipKind) -> bool {
        self.kinds().any(|k| k == kind)
    }
}

/// Metadata attached to a symbol at its definition site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SymbolInformation {
    pub symbol: String,
    #[serde(default)]
    pub kind: SymbolKind,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_documentation: Option<Box<Document>>,
}

impl SymbolInformation {
    pub fn new(
        symbol: impl Into<String>,
        kind: SymbolKind,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    /// Target symbols of every relationship carrying `kind`, in declaration order.
    pub fn related(&self, kind: RelationshipKind) -> Vec<&str> {
        self.relationships
            .iter()
            .filter(|rel| rel.has(kind))
            .map(|rel| rel.symbol.as_str())
            .collect()
    }

    pub fn has_documentation(&self) -> bool {
        !self.documentation.is_empty()
    }

    pub fn is_local(&self) -> bool {
        self.symbol.starts_with("local ")
    }
}

/// One source file of the snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub relative_path: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
    /// Symbols defined in this document, keyed by raw symbol string.
    #[serde(default, with = "symbol_table")]
    pub symbols: IndexMap<String, SymbolInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub position_encoding: PositionEncoding,
}

impl Document {
    pub fn new(relative_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrences.push(occurrence);
        self
    }

    pub fn with_symbol(mut self, info: SymbolInformation) -> Self {
        self.symbols.insert(info.symbol.clone(), info);
        self
    }

    /// First occurrence whose line and column spans both contain the position.
    pub fn occurrence_at(&self, line: i32, character: i32) -> Option<&Occurrence> {
        self.occurrences.iter().find(|occ| {
            (occ.start_line()..=occ.end_line()).contains(&line)
                && (occ.start_char()..=occ.end_char()).contains(&character)
        })
    }

    pub fn occurrences_of<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a Occurrence> {
        self.occurrences.iter().filter(move |occ| occ.symbol == symbol)
    }

    /// First definition occurrence of `symbol` in this document.
    pub fn definition_of(&self, symbol: &str) -> Option<&Occurrence> {
        self.occurrences
            .iter()
            .find(|occ| occ.symbol == symbol && occ.is_definition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SymbolRole;

    fn sample() -> Document {
        Document::new("src/main.py", "python")
            .with_occurrence(Occurrence::new("m.foo().", vec![0, 4, 7], SymbolRole::NONE))
            .with_occurrence(Occurrence::new(
                "m.foo().",
                vec![3, 4, 7],
                SymbolRole::DEFINITION,
            ))
            .with_symbol(SymbolInformation::new("m.foo().", SymbolKind::Function, "foo"))
    }

    #[test]
    fn test_relationship_kinds() {
        let rel = Relationship {
            symbol: "a#".into(),
            is_implementation: true,
            is_reference: true,
            ..Default::default()
        };
        let kinds: Vec<_> = rel.kinds().collect();
        assert_eq!(
            kinds,
            vec![RelationshipKind::Reference, RelationshipKind::Implementation]
        );
    }

    #[test]
    fn test_related_filters_by_kind() {
        let mut info = SymbolInformation::new("b#", SymbolKind::Class, "B");
        info.relationships = vec![
            Relationship::implementation("a#"),
            Relationship {
                symbol: "t#".into(),
                is_type_definition: true,
                ..Default::default()
            },
        ];
        assert_eq!(info.related(RelationshipKind::Implementation), vec!["a#"]);
        assert_eq!(info.related(RelationshipKind::TypeDefinition), vec!["t#"]);
        assert!(info.related(RelationshipKind::Definition).is_empty());
    }

    #[test]
    fn test_document_lookups() {
        let doc = sample();
        assert_eq!(doc.occurrence_at(3, 5).unwrap().start_line(), 3);
        assert!(doc.occurrence_at(3, 9).is_none());
        assert_eq!(doc.occurrences_of("m.foo().").count(), 2);
        assert_eq!(doc.definition_of("m.foo().").unwrap().start_line(), 3);
        assert!(doc.definition_of("m.bar().").is_none());
    }

    #[test]
    fn test_symbol_table_serializes_as_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["symbols"].is_array());
        assert_eq!(json["symbols"][0]["display_name"], "foo");

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_duplicate_symbol_entries_keep_last() {
        let json = serde_json::json!({
            "relative_path": "a.py",
            "symbols": [
                {"symbol": "x.", "display_name": "first"},
                {"symbol": "y.", "display_name": "y"},
                {"symbol": "x.", "display_name": "second"}
            ]
        });
        let doc: Document = serde_json::from_value(json).unwrap();
        assert_eq!(doc.symbols.len(), 2);
        assert_eq!(doc.symbols["x."].display_name, "second");
        assert_eq!(doc.symbols.get_index(0).unwrap().0, "x.");
    }
}
