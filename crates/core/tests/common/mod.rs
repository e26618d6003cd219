#![allow(dead_code)]

use sciplens_api::models::{
    Document, Index, Metadata, Occurrence, Relationship, SymbolInformation, SymbolKind,
    SymbolRole, TextEncoding, ToolInfo,
};
use sciplens_core::{CodeIndex, IndexBuild};

pub const PKG: &str = "python pip shop 1.0";

pub fn sym(descriptors: &str) -> String {
    format!("{PKG} {descriptors}")
}

pub fn metadata() -> Metadata {
    Metadata {
        tool_info: ToolInfo {
            name: "scip-python".to_string(),
            version: "0.6.0".to_string(),
            arguments: vec![],
        },
        project_root: "file:///work/shop".to_string(),
        text_document_encoding: TextEncoding::Utf8,
        ..Default::default()
    }
}

pub fn def(symbol: &str, range: Vec<i32>) -> Occurrence {
    Occurrence::new(symbol, range, SymbolRole::DEFINITION)
}

pub fn reference(symbol: &str, line: i32) -> Occurrence {
    Occurrence::new(symbol, vec![line, 4, 10], SymbolRole::READ_ACCESS)
}

/// Document from scenario 5: `func_a` calls `func_b`.
pub fn call_document() -> Document {
    Document::new("calls.py", "python")
        .with_occurrence(def("func_a().", vec![0, 0, 5, 0]))
        .with_occurrence(reference("func_b().", 2).with_enclosing_range(vec![0, 0, 5, 0]))
        .with_occurrence(def("func_b().", vec![10, 0, 15, 0]))
        .with_symbol(SymbolInformation::new("func_a().", SymbolKind::Function, "func_a"))
        .with_symbol(SymbolInformation::new("func_b().", SymbolKind::Function, "func_b"))
}

pub fn call_index() -> CodeIndex {
    Index::new(metadata(), vec![call_document()], vec![]).build()
}

/// A small shop project: a `Model` base class, `Order` inheriting from it,
/// an `OrderService` calling into `Order`, and a test module.
pub fn shop_index() -> Index {
    let model = sym("shop/models/Model#");
    let order = sym("shop/models/Order#");
    let total = sym("shop/models/Order#total().");
    let service = sym("shop/service/OrderService#");
    let checkout = sym("shop/service/OrderService#checkout().");
    let helper = sym("shop/service/_helper().");
    let test_checkout = sym("tests/test_checkout().");

    let mut order_info = SymbolInformation::new(&order, SymbolKind::Class, "Order");
    order_info.relationships.push(Relationship::implementation(&model));
    order_info.documentation.push("An order.".to_string());

    let models = Document::new("shop/models.py", "python")
        .with_occurrence(def(&model, vec![0, 6, 0, 11]))
        .with_occurrence(def(&order, vec![3, 6, 3, 11]))
        .with_occurrence(reference(&model, 3))
        .with_occurrence(def(&total, vec![4, 8, 12, 0]))
        .with_symbol(SymbolInformation::new(&model, SymbolKind::Class, "Model"))
        .with_symbol(order_info)
        .with_symbol(SymbolInformation::new(&total, SymbolKind::Method, "total"));

    let services = Document::new("shop/service.py", "python")
        .with_occurrence(reference(&order, 0))
        .with_occurrence(def(&service, vec![2, 6, 2, 18]))
        .with_occurrence(def(&checkout, vec![3, 8, 9, 0]))
        .with_occurrence(reference(&order, 4).with_enclosing_range(vec![3, 8, 9, 0]))
        .with_occurrence(reference(&total, 5).with_enclosing_range(vec![3, 8, 9, 0]))
        .with_occurrence(def(&helper, vec![11, 4, 11, 11]))
        .with_symbol(SymbolInformation::new(&service, SymbolKind::Class, "OrderService"))
        .with_symbol(SymbolInformation::new(&checkout, SymbolKind::Method, "checkout"))
        // kind and name left for inference
        .with_symbol(SymbolInformation::new(&helper, SymbolKind::Unspecified, ""));

    let tests = Document::new("tests/test_checkout.py", "python")
        .with_occurrence(def(&test_checkout, vec![0, 4, 6, 0]))
        .with_occurrence(reference(&checkout, 2).with_enclosing_range(vec![0, 4, 6, 0]))
        .with_occurrence(reference(&checkout, 3).with_enclosing_range(vec![0, 4, 6, 0]))
        .with_symbol(SymbolInformation::new(
            &test_checkout,
            SymbolKind::Function,
            "test_checkout",
        ));

    Index::new(
        metadata(),
        vec![models, services, tests],
        vec![SymbolInformation::new(
            "python pip builtins 3.11 builtins/int#",
            SymbolKind::Class,
            "int",
        )],
    )
}
