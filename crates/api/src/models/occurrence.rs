use super::kind::SyntaxKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Bitmask of roles an occurrence plays.
///
/// There is no reference bit: an occurrence is a reference exactly when it is
/// not a definition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct SymbolRole(pub i32);

impl SymbolRole {
    pub const NONE: SymbolRole = SymbolRole(0);
    pub const DEFINITION: SymbolRole = SymbolRole(1);
    pub const IMPORT: SymbolRole = SymbolRole(2);
    pub const WRITE_ACCESS: SymbolRole = SymbolRole(4);
    pub const READ_ACCESS: SymbolRole = SymbolRole(8);
    pub const GENERATED: SymbolRole = SymbolRole(16);
    pub const TEST: SymbolRole = SymbolRole(32);
    pub const FORWARD_DEFINITION: SymbolRole = SymbolRole(64);

    const NAMED: [(SymbolRole, &'static str); 7] = [
        (Self::DEFINITION, "Definition"),
        (Self::IMPORT, "Import"),
        (Self::WRITE_ACCESS, "WriteAccess"),
        (Self::READ_ACCESS, "ReadAccess"),
        (Self::GENERATED, "Generated"),
        (Self::TEST, "Test"),
        (Self::FORWARD_DEFINITION, "ForwardDefinition"),
    ];

    pub fn bits(self) -> i32 {
        self.0
    }

    /// True if any bit of `other` is set.
    pub fn intersects(self, other: SymbolRole) -> bool {
        self.0 & other.0 != 0
    }

    /// True if every bit of `other` is set.
    pub fn contains(self, other: SymbolRole) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(role, _)| self.intersects(*role))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Case-insensitive lookup of a single named role.
    pub fn from_name(name: &str) -> Option<SymbolRole> {
        Self::NAMED
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(role, _)| *role)
    }
}

impl BitOr for SymbolRole {
    type Output = SymbolRole;

    fn bitor(self, rhs: SymbolRole) -> SymbolRole {
        SymbolRole(self.0 | rhs.0)
    }
}

impl fmt::Display for SymbolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            f.write_str("Reference")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// Normalized, zero-based source span.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start_line: i32,
    pub start_char: i32,
    pub end_line: i32,
    pub end_char: i32,
}

impl Range {
    /// Decode the packed wire form: `[start_line, start_char, end_char]` for a
    /// single-line span, `[start_line, start_char, end_line, end_char]` otherwise.
    pub fn from_scip(values: &[i32]) -> Option<Range> {
        match *values {
            [start_line, start_char, end_char] => Some(Range {
                start_line,
                start_char,
                end_line: start_line,
                end_char,
            }),
            [start_line, start_char, end_line, end_char, ..] => Some(Range {
                start_line,
                start_char,
                end_line,
                end_char,
            }),
            _ => None,
        }
    }

    pub fn contains(&self, line: i32, col: i32) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_char {
            return false;
        }
        if line == self.end_line && col > self.end_char {
            return false;
        }
        true
    }

    /// Inclusive line-span overlap.
    pub fn overlaps_lines(&self, start_line: i32, end_line: i32) -> bool {
        !(self.end_line < start_line || self.start_line > end_line)
    }
}

/// One recorded mention of a symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Occurrence {
    pub range: Vec<i32>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub symbol_roles: SymbolRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_kind: Option<SyntaxKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enclosing_range: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub override_documentation: Vec<String>,
}

impl Occurrence {
    pub fn new(symbol: impl Into<String>, range: Vec<i32>, symbol_roles: SymbolRole) -> Self {
        Self {
            range,
            symbol: symbol.into(),
            symbol_roles,
            ..Default::default()
        }
    }

    pub fn with_enclosing_range(mut self, enclosing_range: Vec<i32>) -> Self {
        self.enclosing_range = enclosing_range;
        self
    }

    fn range_at(&self, i: usize) -> i32 {
        self.range.get(i).copied().unwrap_or(0)
    }

    pub fn start_line(&self) -> i32 {
        self.range_at(0)
    }

    pub fn start_char(&self) -> i32 {
        self.range_at(1)
    }

    pub fn end_line(&self) -> i32 {
        if self.range.len() == 3 {
            self.range_at(0)
        } else {
            self.range_at(2)
        }
    }

    pub fn end_char(&self) -> i32 {
        if self.range.len() == 3 {
            self.range_at(2)
        } else {
            self.range_at(3)
        }
    }

    pub fn to_range(&self) -> Range {
        Range {
            start_line: self.start_line(),
            start_char: self.start_char(),
            end_line: self.end_line(),
            end_char: self.end_char(),
        }
    }

    /// Enclosing ranges shorter than four elements are treated as absent.
    pub fn has_enclosing_range(&self) -> bool {
        self.enclosing_range.len() >= 4
    }

    pub fn enclosing_start_line(&self) -> Option<i32> {
        self.has_enclosing_range().then(|| self.enclosing_range[0])
    }

    pub fn enclosing_end_line(&self) -> Option<i32> {
        self.has_enclosing_range().then(|| self.enclosing_range[2])
    }

    pub fn effective_start_line(&self) -> i32 {
        self.enclosing_start_line()
            .unwrap_or_else(|| self.start_line())
    }

    pub fn effective_end_line(&self) -> i32 {
        self.enclosing_end_line().unwrap_or_else(|| self.end_line())
    }

    pub fn is_definition(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::DEFINITION)
    }

    pub fn is_reference(&self) -> bool {
        !self.is_definition()
    }

    pub fn is_import(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::IMPORT)
    }

    pub fn is_write_access(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::WRITE_ACCESS)
    }

    pub fn is_read_access(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::READ_ACCESS)
    }

    pub fn is_generated(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::GENERATED)
    }

    pub fn is_test(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::TEST)
    }

    pub fn is_forward_definition(&self) -> bool {
        self.symbol_roles.intersects(SymbolRole::FORWARD_DEFINITION)
    }
}
