//! Enumerations mirroring the numeric tags of the SCIP wire schema.
//!
//! Every enum serializes as its wire number and maps unknown numbers back to
//! `Unspecified`, so snapshots written by a newer indexer still load.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal) {
            $($variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "i32", into = "i32")]
        #[repr(i32)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_i32(self) -> i32 {
                self as i32
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            /// Case-insensitive lookup by variant name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(name))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Unspecified
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self::from_i32(value).unwrap_or_default()
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.as_i32()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| ApiError::UnknownName {
                    kind: $label,
                    name: s.to_string(),
                })
            }
        }
    };
}

wire_enum! {
    /// What kind of entity a symbol denotes.
    pub enum SymbolKind ("symbol kind") {
        Unspecified = 0,
        Array = 1,
        Assertion = 2,
        AssociatedType = 3,
        Attribute = 4,
        Axiom = 5,
        Boolean = 6,
        Class = 7,
        Constant = 8,
        Constructor = 9,
        DataFamily = 10,
        Enum = 11,
        EnumMember = 12,
        Event = 13,
        Fact = 14,
        Field = 15,
        File = 16,
        Function = 17,
        Getter = 18,
        Grammar = 19,
        Instance = 20,
        Interface = 21,
        Key = 22,
        Lang = 23,
        Lemma = 24,
        Macro = 25,
        Message = 26,
        Method = 27,
        Module = 28,
        Namespace = 29,
        Null = 30,
        Number = 31,
        Object = 32,
        Operator = 33,
        Package = 34,
        PackageObject = 35,
        Parameter = 36,
        ParameterLabel = 37,
        Pattern = 38,
        Predicate = 39,
        Property = 40,
        Protocol = 41,
        Quasiquoter = 42,
        SelfParameter = 43,
        Setter = 44,
        Signature = 45,
        Subscript = 47,
        String = 48,
        Struct = 49,
        Tactic = 50,
        Theorem = 51,
        ThisParameter = 52,
        Trait = 53,
        Type = 54,
        TypeAlias = 55,
        TypeClass = 56,
        TypeFamily = 57,
        TypeParameter = 58,
        Union = 59,
        Value = 60,
        Variable = 61,
        Contract = 62,
        Error = 63,
        Library = 64,
        Modifier = 65,
        AbstractMethod = 66,
        MethodSpecification = 67,
        ProtocolMethod = 68,
        PureVirtualMethod = 69,
        TraitMethod = 70,
        TypeClassMethod = 71,
        Accessor = 72,
        Delegate = 73,
        MethodAlias = 74,
        SingletonClass = 75,
        MethodReceiver = 76,
        SingletonMethod = 77,
        StaticDataMember = 78,
        StaticEvent = 79,
        StaticField = 80,
        StaticMethod = 81,
        StaticProperty = 82,
        StaticVariable = 83,
        Extension = 84,
        Mixin = 85,
        Concept = 86,
    }
}

impl SymbolKind {
    /// Kinds whose definitions count as callable bodies in complexity metrics.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            SymbolKind::Function
                | SymbolKind::Method
                | SymbolKind::Constructor
                | SymbolKind::StaticMethod
                | SymbolKind::AbstractMethod
        )
    }
}

wire_enum! {
    /// Lexical highlighting class of an occurrence.
    pub enum SyntaxKind ("syntax kind") {
        Unspecified = 0,
        Comment = 1,
        PunctuationDelimiter = 2,
        PunctuationBracket = 3,
        Keyword = 4,
        IdentifierOperator = 5,
        Identifier = 6,
        IdentifierBuiltin = 7,
        IdentifierNull = 8,
        IdentifierConstant = 9,
        IdentifierMutableGlobal = 10,
        IdentifierParameter = 11,
        IdentifierLocal = 12,
        IdentifierShadowed = 13,
        IdentifierNamespace = 14,
        IdentifierFunction = 15,
        IdentifierFunctionDefinition = 16,
        IdentifierMacro = 17,
        IdentifierMacroDefinition = 18,
        IdentifierType = 19,
        IdentifierBuiltinType = 20,
        IdentifierAttribute = 21,
        RegexEscape = 22,
        RegexRepeated = 23,
        RegexWildcard = 24,
        RegexDelimiter = 25,
        RegexJoin = 26,
        StringLiteral = 27,
        StringLiteralEscape = 28,
        StringLiteralSpecial = 29,
        StringLiteralKey = 30,
        CharacterLiteral = 31,
        NumericLiteral = 32,
        BooleanLiteral = 33,
        Tag = 34,
        TagAttribute = 35,
        TagDelimiter = 36,
    }
}

wire_enum! {
    /// How the character offsets of a document's ranges are counted.
    pub enum PositionEncoding ("position encoding") {
        Unspecified = 0,
        Utf8CodeUnitOffsetFromLineStart = 1,
        Utf16CodeUnitOffsetFromLineStart = 2,
        Utf32CodeUnitOffsetFromLineStart = 3,
    }
}

wire_enum! {
    pub enum TextEncoding ("text encoding") {
        Unspecified = 0,
        Utf8 = 1,
        Utf16 = 2,
    }
}

wire_enum! {
    pub enum ProtocolVersion ("protocol version") {
        Unspecified = 0,
    }
}
