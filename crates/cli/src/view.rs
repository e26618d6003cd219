use sciplens_api::models::{Descriptor, Document, Occurrence, SymbolInformation};
use tabled::Tabled;
use tabled::settings::Style;

/// A defined symbol with the document that defines it
#[derive(Tabled)]
pub struct SymbolRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
}

impl SymbolRow {
    pub fn new(info: &SymbolInformation, document: Option<&Document>) -> Self {
        Self {
            kind: info.kind.to_string(),
            name: info.display_name.clone(),
            location: document
                .map(|doc| doc.relative_path.clone())
                .unwrap_or_else(|| "-".to_string()),
            symbol: info.symbol.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct OccurrenceRow {
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Roles")]
    pub roles: String,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
}

impl OccurrenceRow {
    pub fn new(document: &Document, occurrence: &Occurrence) -> Self {
        Self {
            // 1-based for editors
            location: format!(
                "{}:{}:{}",
                document.relative_path,
                occurrence.start_line() + 1,
                occurrence.start_char() + 1
            ),
            roles: occurrence.symbol_roles.to_string(),
            symbol: occurrence.symbol.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct RankRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Refs")]
    pub references: usize,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
}

#[derive(Tabled)]
pub struct DescriptorRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Suffix")]
    pub suffix: String,
    #[tabled(rename = "Disambiguator")]
    pub disambiguator: String,
}

impl DescriptorRow {
    pub fn new(position: usize, descriptor: &Descriptor) -> Self {
        Self {
            position,
            name: descriptor.name.to_string(),
            suffix: format!("{:?}", descriptor.suffix),
            disambiguator: descriptor
                .disambiguator
                .as_deref()
                .unwrap_or("-")
                .to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: &str, value: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Symbols listed one per row, in order
#[derive(Tabled)]
pub struct NameRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Symbol")]
    pub symbol: String,
}

pub fn name_rows<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Vec<NameRow> {
    symbols
        .into_iter()
        .enumerate()
        .map(|(i, symbol)| NameRow {
            position: i + 1,
            symbol: symbol.to_string(),
        })
        .collect()
}

/// Render rows, or a short notice when there is nothing to show.
pub fn render<T: Tabled>(rows: Vec<T>, empty: &str) -> String {
    if rows.is_empty() {
        empty.to_string()
    } else {
        tabled::Table::new(rows).with(Style::psql()).to_string()
    }
}
