use super::kind::SymbolKind;
use super::util::{serde_arc_str, serde_opt_arc_str};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Scheme used for document-local symbols (`local <id>`).
pub const LOCAL_SCHEME: &str = "local";

/// The dependency that owns a global symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    #[serde(with = "serde_arc_str")]
    pub manager: Arc<str>,
    #[serde(with = "serde_arc_str")]
    pub name: Arc<str>,
    #[serde(with = "serde_arc_str")]
    pub version: Arc<str>,
}

impl Package {
    pub fn new(
        manager: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
        version: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            manager: manager.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.manager, self.name, self.version)
    }
}

/// Suffix of a descriptor. It picks the grammar character a descriptor renders
/// with and the entity kind it implies when no explicit kind is known.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Suffix {
    #[default]
    Unspecified = 0,
    Namespace = 1,
    Type = 2,
    Term = 3,
    Method = 4,
    TypeParameter = 5,
    Parameter = 6,
    Meta = 7,
    Local = 8,
    Macro = 9,
}

impl Suffix {
    /// Entity kind implied by this suffix alone.
    pub fn fallback_kind(self) -> SymbolKind {
        match self {
            Suffix::Namespace => SymbolKind::Namespace,
            Suffix::Type => SymbolKind::Type,
            Suffix::Term | Suffix::Local => SymbolKind::Variable,
            Suffix::Method => SymbolKind::Method,
            Suffix::TypeParameter => SymbolKind::TypeParameter,
            Suffix::Parameter => SymbolKind::Parameter,
            Suffix::Macro => SymbolKind::Macro,
            Suffix::Meta | Suffix::Unspecified => SymbolKind::Unspecified,
        }
    }
}

/// One segment of a symbol's scope chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    #[serde(with = "serde_arc_str")]
    pub name: Arc<str>,
    #[serde(
        default,
        with = "serde_opt_arc_str",
        skip_serializing_if = "Option::is_none"
    )]
    pub disambiguator: Option<Arc<str>>,
    pub suffix: Suffix,
}

impl Descriptor {
    pub fn new(name: impl Into<Arc<str>>, suffix: Suffix) -> Self {
        Self {
            name: name.into(),
            disambiguator: None,
            suffix,
        }
    }

    pub fn method(name: impl Into<Arc<str>>, disambiguator: Option<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            disambiguator,
            suffix: Suffix::Method,
        }
    }
}

/// Structured identity of a symbol string.
///
/// Equality is structural: scheme, package and the ordered descriptor chain
/// (outermost scope first) must all match.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedSymbol {
    #[serde(with = "serde_arc_str")]
    pub scheme: Arc<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<Package>,
    pub descriptors: Vec<Descriptor>,
}

impl ParsedSymbol {
    /// A document-local symbol with the given identifier.
    pub fn local(id: impl Into<Arc<str>>) -> Self {
        Self {
            scheme: Arc::from(LOCAL_SCHEME),
            package: None,
            descriptors: vec![Descriptor::new(id, Suffix::Local)],
        }
    }

    pub fn is_local(&self) -> bool {
        &*self.scheme == LOCAL_SCHEME
    }

    /// Descriptor names joined by `.`.
    pub fn fully_qualified_name(&self) -> String {
        self.descriptors
            .iter()
            .map(|d| d.name.as_ref())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// The enclosing scope, or `None` when there is at most one descriptor.
    pub fn parent(&self) -> Option<ParsedSymbol> {
        if self.descriptors.len() <= 1 {
            return None;
        }
        Some(ParsedSymbol {
            scheme: self.scheme.clone(),
            package: self.package.clone(),
            descriptors: self.descriptors[..self.descriptors.len() - 1].to_vec(),
        })
    }

    pub fn last_descriptor(&self) -> Option<&Descriptor> {
        self.descriptors.last()
    }
}
