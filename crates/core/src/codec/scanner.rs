//! Single-pass cursor over the symbol grammar.
//!
//! ```text
//! symbol     := "local " id | scheme ' ' manager ' ' name ' ' version ' ' descriptor*
//! descriptor := id '/' | id '#' | id '.' | id '(' disambiguator? ").' | '(' id ')'
//!             | '[' id ']' | id ':' | id '!'
//! id         := [A-Za-z0-9_+\-$]+ | '`' (char | "``")* '`'
//! ```
//!
//! Header fields escape a literal space by doubling it. Unrecognized input
//! between descriptors is skipped one character at a time; an unterminated
//! backtick or a method without its closing `).` rejects the whole symbol.

use super::pool::SymbolPool;
use sciplens_api::models::{Descriptor, Package, ParsedSymbol, Suffix};
use std::borrow::Cow;

const LOCAL_PREFIX: &str = "local ";
const HEADER_FIELDS: usize = 4;
/// Placeholder used in every package field of a symbol without a package.
const NO_PACKAGE: &str = ".";

pub(crate) fn is_simple_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'-' | b'$')
}

pub(crate) fn parse(input: &str, pool: &SymbolPool) -> Option<ParsedSymbol> {
    if let Some(id) = input.strip_prefix(LOCAL_PREFIX) {
        if id.is_empty() {
            return None;
        }
        return Some(ParsedSymbol::local(pool.intern(id)));
    }

    let (fields, rest) = split_header(input)?;
    if rest.is_empty() {
        return None;
    }

    let [scheme, manager, name, version] = fields;
    let package = if manager == NO_PACKAGE && name == NO_PACKAGE && version == NO_PACKAGE {
        None
    } else {
        Some(Package {
            manager: pool.intern(&manager),
            name: pool.intern(&name),
            version: pool.intern(&version),
        })
    };

    Some(ParsedSymbol {
        scheme: pool.intern(&scheme),
        package,
        descriptors: parse_descriptors(rest, pool)?,
    })
}

/// Split off the four space-separated header fields, decoding doubled spaces.
fn split_header(input: &str) -> Option<([String; HEADER_FIELDS], &str)> {
    let bytes = input.as_bytes();
    let mut fields: Vec<String> = Vec::with_capacity(HEADER_FIELDS);
    let mut current = String::new();
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() && fields.len() < HEADER_FIELDS {
        if bytes[i] != b' ' {
            i += 1;
            continue;
        }
        current.push_str(&input[segment_start..i]);
        if bytes.get(i + 1) == Some(&b' ') {
            current.push(' ');
            i += 2;
        } else {
            fields.push(std::mem::take(&mut current));
            i += 1;
        }
        segment_start = i;
    }

    let fields: [String; HEADER_FIELDS] = fields.try_into().ok()?;
    Some((fields, &input[i..]))
}

enum Ident<'a> {
    Found(Cow<'a, str>, usize),
    Missing,
    Unterminated,
}

enum Step {
    Parsed(Descriptor, usize),
    Skip,
    Malformed,
}

fn parse_descriptors(s: &str, pool: &SymbolPool) -> Option<Vec<Descriptor>> {
    let mut descriptors = Vec::new();
    let mut pos = 0;

    while pos < s.len() {
        match next_descriptor(s, pos, pool) {
            Step::Parsed(descriptor, next) => {
                descriptors.push(descriptor);
                pos = next;
            }
            Step::Skip => {
                pos += s[pos..].chars().next().map_or(1, char::len_utf8);
            }
            Step::Malformed => return None,
        }
    }

    Some(descriptors)
}

fn next_descriptor(s: &str, pos: usize, pool: &SymbolPool) -> Step {
    let bytes = s.as_bytes();
    match bytes[pos] {
        b'[' => type_parameter(s, pos + 1, pool),
        b'(' => parameter(s, pos + 1, pool),
        _ => {
            let (name, after) = match identifier(s, pos) {
                Ident::Found(name, after) => (name, after),
                Ident::Missing => return Step::Skip,
                Ident::Unterminated => return Step::Malformed,
            };
            let suffix = match bytes.get(after) {
                // dangling identifier at end of input
                None => return Step::Skip,
                Some(b'(') => return method(s, after + 1, &name, pool),
                Some(b'/') => Suffix::Namespace,
                Some(b'#') => Suffix::Type,
                Some(b'.') => Suffix::Term,
                Some(b':') => Suffix::Meta,
                Some(b'!') => Suffix::Macro,
                Some(_) => return Step::Skip,
            };
            Step::Parsed(Descriptor::new(pool.intern(&name), suffix), after + 1)
        }
    }
}

fn identifier(s: &str, pos: usize) -> Ident<'_> {
    let bytes = s.as_bytes();
    match bytes.get(pos) {
        None => Ident::Missing,
        Some(b'`') => escaped_identifier(s, pos + 1),
        Some(_) => {
            let end = pos
                + bytes[pos..]
                    .iter()
                    .take_while(|b| is_simple_char(**b))
                    .count();
            if end == pos {
                Ident::Missing
            } else {
                Ident::Found(Cow::Borrowed(&s[pos..end]), end)
            }
        }
    }
}

/// `start` points just past the opening backtick.
fn escaped_identifier(s: &str, start: usize) -> Ident<'_> {
    let bytes = s.as_bytes();
    let mut content = String::new();
    let mut segment_start = start;
    let mut i = start;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        content.push_str(&s[segment_start..i]);
        if bytes.get(i + 1) == Some(&b'`') {
            content.push('`');
            i += 2;
            segment_start = i;
        } else {
            return Ident::Found(Cow::Owned(content), i + 1);
        }
    }

    Ident::Unterminated
}

/// `name(disambiguator).`; `start` points just past the `(`.
fn method(s: &str, start: usize, name: &str, pool: &SymbolPool) -> Step {
    let bytes = s.as_bytes();
    let end = start
        + bytes[start..]
            .iter()
            .take_while(|b| is_simple_char(**b))
            .count();
    if bytes.get(end..end + 2) != Some(b").".as_slice()) {
        return Step::Malformed;
    }
    let disambiguator = (end > start).then(|| pool.intern(&s[start..end]));
    Step::Parsed(Descriptor::method(pool.intern(name), disambiguator), end + 2)
}

/// `[name]`; `start` points just past the `[`.
fn type_parameter(s: &str, start: usize, pool: &SymbolPool) -> Step {
    match identifier(s, start) {
        Ident::Found(name, after) if s.as_bytes().get(after) == Some(&b']') => Step::Parsed(
            Descriptor::new(pool.intern(&name), Suffix::TypeParameter),
            after + 1,
        ),
        Ident::Unterminated => Step::Malformed,
        _ => Step::Skip,
    }
}

/// `(name)` not followed by `.`; `start` points just past the `(`.
fn parameter(s: &str, start: usize, pool: &SymbolPool) -> Step {
    let bytes = s.as_bytes();
    match identifier(s, start) {
        Ident::Found(name, after)
            if bytes.get(after) == Some(&b')') && bytes.get(after + 1) != Some(&b'.') =>
        {
            Step::Parsed(
                Descriptor::new(pool.intern(&name), Suffix::Parameter),
                after + 1,
            )
        }
        Ident::Unterminated => Step::Malformed,
        _ => Step::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(s: &str) -> Option<ParsedSymbol> {
        parse(s, &SymbolPool::new())
    }

    fn names(parsed: &ParsedSymbol) -> Vec<(&str, Suffix)> {
        parsed
            .descriptors
            .iter()
            .map(|d| (d.name.as_ref(), d.suffix))
            .collect()
    }

    #[test]
    fn test_header_split_decodes_doubled_space() {
        let (fields, rest) = split_header("my  scheme pip pkg 1.0 main/").unwrap();
        assert_eq!(fields[0], "my scheme");
        assert_eq!(fields[3], "1.0");
        assert_eq!(rest, "main/");
    }

    #[test]
    fn test_short_header_is_rejected() {
        assert!(parse_str("python pip pkg").is_none());
        assert!(parse_str("python pip pkg 1.0").is_none());
        assert!(parse_str("python pip pkg 1.0 ").is_none());
    }

    #[test]
    fn test_empty_local_is_rejected() {
        assert!(parse_str("local ").is_none());
    }

    #[test]
    fn test_dot_placeholders_mean_no_package() {
        let parsed = parse_str("scip-ts . . . foo/").unwrap();
        assert!(parsed.package.is_none());
        assert_eq!(names(&parsed), vec![("foo", Suffix::Namespace)]);
    }

    #[test]
    fn test_every_suffix() {
        let parsed = parse_str("s m n v ns/Ty#term.meth(+1).(p)[T]meta:mac!").unwrap();
        assert_eq!(
            names(&parsed),
            vec![
                ("ns", Suffix::Namespace),
                ("Ty", Suffix::Type),
                ("term", Suffix::Term),
                ("meth", Suffix::Method),
                ("p", Suffix::Parameter),
                ("T", Suffix::TypeParameter),
                ("meta", Suffix::Meta),
                ("mac", Suffix::Macro),
            ]
        );
        assert_eq!(parsed.descriptors[3].disambiguator.as_deref(), Some("+1"));
    }

    #[test]
    fn test_lenient_skip_of_unknown_characters() {
        // '%' is not an identifier character; the scanner steps over it
        let parsed = parse_str("s m n v a/%b#").unwrap();
        assert_eq!(
            names(&parsed),
            vec![("a", Suffix::Namespace), ("b", Suffix::Type)]
        );

        // identifier followed by an unknown character is dropped as well
        let parsed = parse_str("s m n v a/b&c#").unwrap();
        assert_eq!(names(&parsed), vec![("a", Suffix::Namespace), ("c", Suffix::Type)]);
    }

    #[test]
    fn test_dangling_identifier_is_skipped() {
        let parsed = parse_str("s m n v a/tail").unwrap();
        assert_eq!(names(&parsed), vec![("a", Suffix::Namespace)]);
    }

    #[test]
    fn test_parameter_followed_by_dot_is_skipped() {
        let parsed = parse_str("s m n v (x).").unwrap();
        // '(' skipped, then "x" is dangling before ')', ')' skipped, '.' skipped
        assert!(parsed.descriptors.is_empty());
    }

    #[test]
    fn test_unclosed_type_parameter_is_skipped() {
        let parsed = parse_str("s m n v [T a/").unwrap();
        assert_eq!(names(&parsed), vec![("a", Suffix::Namespace)]);
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(parse_str("s m n v `unterminated/").is_none());
        assert!(parse_str("s m n v foo(").is_none());
        assert!(parse_str("s m n v foo(bar)").is_none());
        assert!(parse_str("s m n v [`T]").is_none());
    }

    #[test]
    fn test_escaped_identifier_with_doubled_backtick() {
        let parsed = parse_str("s m n v `a``b`#").unwrap();
        assert_eq!(names(&parsed), vec![("a`b", Suffix::Type)]);
    }

    #[test]
    fn test_skip_steps_over_multibyte_characters() {
        let parsed = parse_str("s m n v é/ok.").unwrap();
        assert_eq!(names(&parsed), vec![("ok", Suffix::Term)]);
    }
}
