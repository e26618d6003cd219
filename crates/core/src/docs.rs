//! Best-effort helpers over symbol documentation. They never fail; missing
//! input yields an empty string.

use once_cell::sync::Lazy;
use regex::Regex;
use sciplens_api::models::SymbolInformation;

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z]*\n.*?\n```").expect("static regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("static regex"));

/// Signature text of a symbol.
///
/// Prefers the signature document's text, then the first line of the first
/// fenced code block in the documentation.
pub fn extract_signature(info: &SymbolInformation) -> String {
    let from_signature = info
        .signature_documentation
        .as_ref()
        .and_then(|doc| doc.text.as_deref())
        .map(str::trim)
        .unwrap_or_default();
    if !from_signature.is_empty() {
        return from_signature.to_string();
    }
    signature_from_markdown(&info.documentation)
}

fn signature_from_markdown(documentation: &[String]) -> String {
    documentation
        .iter()
        .filter(|doc| doc.starts_with("```"))
        .filter_map(|doc| doc.split('\n').nth(1))
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Documentation lines merged into prose, with fenced code blocks removed and
/// runs of blank lines collapsed.
pub fn clean_documentation(documentation: &[String]) -> String {
    if documentation.is_empty() {
        return String::new();
    }
    let merged = documentation.join("\n");
    let without_code = CODE_BLOCK.replace_all(&merged, "");
    let collapsed = BLANK_RUN.replace_all(without_code.trim(), "\n\n");
    collapsed.trim().to_string()
}
