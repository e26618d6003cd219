mod common;

use common::{shop_index, sym};
use sciplens_api::models::{SymbolKind, SymbolRole};
use sciplens_api::semantic::HierarchyDirection;
use sciplens_core::IndexBuild;
use sciplens_core::query::{
    AndFilter, KindFilter, NotFilter, OccurrenceCountFilter, OrFilter, PatternFilter, RoleFilter,
    SymbolFilter,
};

#[test]
fn given_kind_and_language_filters_when_executing_then_results_follow_document_order() {
    let index = shop_index().build();
    let classes: Vec<&str> = index
        .query()
        .by_kind(SymbolKind::Class)
        .by_language("PYTHON")
        .execute()
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(classes, vec!["Model", "Order", "OrderService"]);
}

#[test]
fn given_exact_name_when_executing_then_only_that_name_is_returned() {
    let index = shop_index().build();
    let found = index.query().by_name("checkout", true).execute();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].symbol, sym("shop/service/OrderService#checkout()."));

    assert_eq!(index.query().by_name("Order", false).count(), 2);
}

#[test]
fn given_pattern_and_document_filters_when_executing_then_matches_are_narrowed() {
    let index = shop_index().build();

    let query = index
        .query()
        .by_pattern("Order*", false)
        .expect("valid glob")
        .by_document("shop/*")
        .expect("valid glob");
    assert_eq!(query.count(), 2);

    let in_tests = index.query().by_documents(&["tests/*"]).expect("valid globs");
    assert_eq!(in_tests.first().map(|i| i.display_name.as_str()), Some("test_checkout"));
    assert!(index.query().by_pattern("[", false).is_err());
}

#[test]
fn given_role_and_documentation_filters_when_executing_then_index_is_consulted() {
    let index = shop_index().build();

    assert_eq!(index.query().is_exported().count(), 7);
    assert_eq!(index.query().with_role(SymbolRole::WRITE_ACCESS).count(), 0);
    assert_eq!(
        index.query().has_documentation().first().map(|i| i.display_name.as_str()),
        Some("Order")
    );
    assert!(index.query().by_name("nothing", true).first().is_none());
    assert!(!index.query().by_name("nothing", true).exists());
}

#[test]
fn given_composite_filters_when_applied_then_boolean_logic_holds() {
    let index = shop_index().build();

    let referenced_non_class = AndFilter::new(vec![
        Box::new(OccurrenceCountFilter::new(Some(2), None)),
        Box::new(NotFilter::new(Box::new(KindFilter::new(SymbolKind::Class)))),
    ]);
    let names: Vec<&str> = index
        .query()
        .with_filter(referenced_non_class)
        .execute()
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["total", "checkout"]);

    let either = OrFilter::new(vec![
        Box::new(PatternFilter::regex("^test_").expect("valid regex")),
        Box::new(RoleFilter::new(SymbolRole::TEST)),
    ]);
    assert_eq!(index.query().with_filter(either).count(), 1);

    let (_, info) = index.defined_symbols().next().expect("at least one symbol");
    assert!(!OrFilter::default().matches(info, None, Some(&index)));
    assert!(AndFilter::default().matches(info, None, Some(&index)));
}

#[test]
fn given_query_when_grouping_then_groups_keep_first_seen_order() {
    let index = shop_index().build();

    let by_document = index.query().group_by_document();
    let paths: Vec<&str> = by_document.keys().copied().collect();
    assert_eq!(paths, vec!["shop/models.py", "shop/service.py", "tests/test_checkout.py"]);
    assert_eq!(by_document["shop/service.py"].len(), 3);

    let by_kind = index.query().group_by_kind();
    assert_eq!(by_kind[&SymbolKind::Class].len(), 3);
    assert_eq!(by_kind[&SymbolKind::Method].len(), 3);

    let stats = index.query().by_kind(SymbolKind::Method).aggregate_stats();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.kind_distribution.get("Method"), Some(&3));
}

#[test]
fn given_query_api_when_delegating_then_index_answers() {
    let index = shop_index().build();
    let query = index.query();

    assert_eq!(
        query.find_references(&sym("shop/models/Order#")).len(),
        2
    );
    assert_eq!(
        query.find_implementations(&sym("shop/models/Model#")),
        vec![sym("shop/models/Order#").as_str()]
    );
    assert_eq!(
        query.find_hierarchy(&sym("shop/models/Model#"), HierarchyDirection::Down),
        vec![sym("shop/models/Order#").as_str()]
    );
}

#[test]
fn given_searcher_when_matching_names_then_fuzzy_and_prefix_work() {
    let index = shop_index().build();
    let searcher = index.searcher();

    let fuzzy: Vec<&str> = searcher
        .fuzzy_search("Ordr", 5, 0.6)
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(fuzzy, vec!["Order"]);

    let completed: Vec<&str> = searcher
        .autocomplete("ord", 10)
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(completed, vec!["Order", "OrderService"]);

    assert_eq!(searcher.search("checkout").len(), 2);
}

#[test]
fn given_caller_and_callee_when_locating_call_sites_then_lines_are_reported() {
    let index = shop_index().build();
    let locator = index.call_sites();
    let test_checkout = sym("tests/test_checkout().");
    let checkout = sym("shop/service/OrderService#checkout().");

    let all = locator.find_all_call_sites(&test_checkout, &checkout);
    let lines: Vec<i32> = all.iter().map(|s| s.line_number).collect();
    assert_eq!(lines, vec![2, 3]);
    assert!(all.iter().all(|s| s.document_path == "tests/test_checkout.py"));

    let first = locator
        .find_call_site(&test_checkout, &checkout)
        .expect("call site exists");
    assert_eq!(first.line_number, 2);
    assert_eq!(
        locator
            .find_call_sites_in_range(&test_checkout, &checkout, 3, 10)
            .len(),
        1
    );
    assert!(locator.find_call_site(&checkout, &test_checkout).is_none());
}
