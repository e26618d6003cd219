use super::scanner::is_simple_char;
use sciplens_api::models::{Descriptor, ParsedSymbol, Suffix};

/// Render a parsed symbol back to its textual form.
///
/// Descriptor names made only of simple identifier characters are written
/// bare, so an input that backtick-escaped such a name comes back unescaped.
pub fn format_symbol(symbol: &ParsedSymbol) -> String {
    if symbol.is_local() {
        let id = symbol
            .descriptors
            .first()
            .map(|d| d.name.as_ref())
            .unwrap_or_default();
        return format!("local {id}");
    }

    let mut out = String::new();
    push_field(&mut out, &symbol.scheme);
    out.push(' ');
    match &symbol.package {
        Some(package) => {
            for field in [&package.manager, &package.name, &package.version] {
                push_field(&mut out, field);
                out.push(' ');
            }
        }
        None => out.push_str(". . . "),
    }
    for descriptor in &symbol.descriptors {
        push_descriptor(&mut out, descriptor);
    }
    out
}

fn push_field(out: &mut String, field: &str) {
    out.push_str(&field.replace(' ', "  "));
}

fn push_name(out: &mut String, name: &str) {
    if !name.is_empty() && name.bytes().all(is_simple_char) {
        out.push_str(name);
    } else {
        out.push('`');
        out.push_str(&name.replace('`', "``"));
        out.push('`');
    }
}

fn push_descriptor(out: &mut String, descriptor: &Descriptor) {
    match descriptor.suffix {
        Suffix::Method => {
            push_name(out, &descriptor.name);
            out.push('(');
            if let Some(disambiguator) = &descriptor.disambiguator {
                out.push_str(disambiguator);
            }
            out.push_str(").");
        }
        Suffix::Parameter => {
            out.push('(');
            push_name(out, &descriptor.name);
            out.push(')');
        }
        Suffix::TypeParameter => {
            out.push('[');
            push_name(out, &descriptor.name);
            out.push(']');
        }
        suffix => {
            push_name(out, &descriptor.name);
            match suffix {
                Suffix::Namespace => out.push('/'),
                Suffix::Type => out.push('#'),
                Suffix::Term => out.push('.'),
                Suffix::Meta => out.push(':'),
                Suffix::Macro => out.push('!'),
                _ => {}
            }
        }
    }
}
