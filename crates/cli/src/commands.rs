use crate::view::{
    DescriptorRow, FieldRow, OccurrenceRow, RankRow, SymbolRow, name_rows, render,
};
use crate::{Cli, Commands, SymbolsArgs};
use anyhow::{Context, bail};
use sciplens_api::models::{Document, Occurrence, SymbolInformation};
use sciplens_api::semantic::{
    CallHierarchyAnalyzer, HierarchyAnalyzer, HierarchyDirection, SymbolLookup,
};
use sciplens_core::codec::SymbolCodec;
use sciplens_core::{CodeIndex, SciplensConfig, docs, load_snapshot};
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// Run one command and return what should be printed.
pub fn execute(cli: &Cli, config: &SciplensConfig) -> anyhow::Result<String> {
    if let Commands::Parse { symbol } = &cli.command {
        return parse(symbol, config, cli.json);
    }

    let index = open_index(cli, config)?;
    let json = cli.json;

    match &cli.command {
        Commands::Stats => stats(&index, json),
        Commands::Symbols(args) => symbols(&index, args, json),
        Commands::Def { symbol } => definition(&index, symbol, json),
        Commands::Refs { symbol } => {
            let refs: Vec<_> = index
                .located_occurrences(symbol)
                .into_iter()
                .filter(|(_, occ)| occ.is_reference())
                .collect();
            occurrences(&refs, json, "No references found.")
        }
        Commands::Callers { symbol } => {
            let callers = index.find_callers(symbol);
            names(&callers, json, "No callers found.")
        }
        Commands::Callees { symbol } => {
            let callees = index.find_callees(symbol);
            names(&callees, json, "No callees found.")
        }
        Commands::Path { from, to, max_depth } => {
            let index = match max_depth {
                Some(depth) => index.clone().with_call_path_max_depth(*depth),
                None => index.clone(),
            };
            match index.call_path(from, to) {
                Some(path) => names(&path, json, ""),
                None if json => Ok("null".to_string()),
                None => Ok(format!(
                    "No call path within {} symbols.",
                    index.call_path_max_depth()
                )),
            }
        }
        Commands::Hierarchy { symbol, direction } => hierarchy(&index, symbol, *direction, json),
        Commands::Hotspots { limit } => {
            let hotspots = index.find_hotspots(limit.unwrap_or(config.hotspot_limit));
            if json {
                return to_json(&hotspots);
            }
            let rows = hotspots
                .into_iter()
                .enumerate()
                .map(|(i, (symbol, references))| RankRow {
                    rank: i + 1,
                    references,
                    symbol: symbol.to_string(),
                })
                .collect();
            Ok(render(rows, "No defined symbols."))
        }
        Commands::DeadCode { excludes } => {
            let excludes: Vec<&str> = if excludes.is_empty() {
                config.dead_code_excludes.iter().map(String::as_str).collect()
            } else {
                excludes.iter().map(String::as_str).collect()
            };
            let dead = index.find_dead_code(Some(excludes.as_slice()))?;
            names(&dead, json, "No dead code found.")
        }
        Commands::Complexity { document } => {
            let report = index.analyze_complexity(document.as_deref());
            if json {
                return to_json(&report);
            }
            let rows = vec![
                FieldRow::new("Functions", report.function_count),
                FieldRow::new("Classes", report.class_count),
                FieldRow::new(
                    "Avg function length",
                    format!("{:.1}", report.avg_function_length),
                ),
                FieldRow::new("Max function length", report.max_function_length),
            ];
            Ok(render(rows, ""))
        }
        Commands::Search {
            query,
            fuzzy,
            prefix,
            limit,
            cutoff,
        } => {
            let searcher = index.searcher();
            let mut found = if *fuzzy {
                searcher.fuzzy_search(query, *limit, *cutoff)
            } else if *prefix {
                searcher.autocomplete(query, *limit)
            } else {
                searcher.search(query)
            };
            found.truncate(*limit);
            symbol_list(&index, &found, json)
        }
        Commands::Parse { .. } => unreachable!("handled before loading an index"),
    }
}

fn open_index(cli: &Cli, config: &SciplensConfig) -> anyhow::Result<CodeIndex> {
    let Some(path) = cli.index.as_deref() else {
        bail!("no index given; pass --index <FILE>");
    };
    let snapshot =
        load_snapshot(path).with_context(|| format!("failed to load {}", path.display()))?;
    let index = CodeIndex::from_config(snapshot, config);
    info!("Opened {} ({} documents)", path.display(), index.documents().len());
    Ok(index)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn names<S: AsRef<str> + Serialize>(
    symbols: &[S],
    json: bool,
    empty: &str,
) -> anyhow::Result<String> {
    if json {
        return to_json(symbols);
    }
    Ok(render(name_rows(symbols.iter().map(AsRef::as_ref)), empty))
}

fn occurrences(
    found: &[(&Document, &Occurrence)],
    json: bool,
    empty: &str,
) -> anyhow::Result<String> {
    if json {
        let values: Vec<_> = found
            .iter()
            .map(|(doc, occ)| {
                json!({
                    "document": doc.relative_path,
                    "occurrence": occ,
                })
            })
            .collect();
        return to_json(&values);
    }
    let rows = found
        .iter()
        .map(|(doc, occ)| OccurrenceRow::new(doc, occ))
        .collect();
    Ok(render(rows, empty))
}

fn symbol_list(
    index: &CodeIndex,
    found: &[&SymbolInformation],
    json: bool,
) -> anyhow::Result<String> {
    if json {
        return to_json(found);
    }
    let rows = found
        .iter()
        .map(|info| SymbolRow::new(info, index.document_by_symbol(&info.symbol)))
        .collect();
    Ok(render(rows, "No symbols found."))
}

fn stats(index: &CodeIndex, json: bool) -> anyhow::Result<String> {
    let stats = index.statistics();
    if json {
        return to_json(&stats);
    }

    let tool = &index.metadata().tool_info;
    let mut rows = vec![
        FieldRow::new("Tool", format!("{} {}", tool.name, tool.version).trim()),
        FieldRow::new("Documents", stats.total_documents),
        FieldRow::new("Symbols", stats.total_symbols),
        FieldRow::new("Occurrences", stats.total_occurrences),
        FieldRow::new("External symbols", index.external_symbols().len()),
    ];
    for (language, count) in &stats.language_distribution {
        rows.push(FieldRow::new(&format!("Language: {language}"), count));
    }
    for (kind, count) in &stats.kind_distribution {
        rows.push(FieldRow::new(&format!("Kind: {kind}"), count));
    }
    Ok(render(rows, ""))
}

fn symbols(index: &CodeIndex, args: &SymbolsArgs, json: bool) -> anyhow::Result<String> {
    let mut query = index.query();
    if let Some(kind) = args.kind {
        query = query.by_kind(kind);
    }
    if let Some(language) = &args.language {
        query = query.by_language(language);
    }
    if let Some(name) = &args.name {
        query = query.by_name(name, args.exact);
    }
    if let Some(pattern) = &args.pattern {
        query = query.by_pattern(pattern, args.regex)?;
    }
    if !args.documents.is_empty() {
        query = query.by_documents(&args.documents)?;
    }
    if args.documented {
        query = query.has_documentation();
    }
    if args.exported {
        query = query.is_exported();
    }

    let mut found = query.execute();
    if let Some(limit) = args.limit {
        found.truncate(limit);
    }
    symbol_list(index, &found, json)
}

fn definition(index: &CodeIndex, symbol: &str, json: bool) -> anyhow::Result<String> {
    let Some((doc, occ)) = index
        .located_occurrences(symbol)
        .into_iter()
        .find(|(_, occ)| occ.is_definition())
    else {
        return Ok(if json {
            "null".to_string()
        } else {
            format!("No definition found for '{symbol}'.")
        });
    };

    let info = index
        .symbol_info(symbol)
        .or_else(|| index.external_symbol(symbol));
    if json {
        return to_json(&json!({
            "document": doc.relative_path,
            "occurrence": occ,
            "info": info,
        }));
    }

    let mut out = render(vec![OccurrenceRow::new(doc, occ)], "");
    if let Some(info) = info {
        let signature = docs::extract_signature(info);
        if !signature.is_empty() {
            out.push_str(&format!("\n\n{signature}"));
        }
        let documentation = docs::clean_documentation(&info.documentation);
        if !documentation.is_empty() {
            out.push_str(&format!("\n\n{documentation}"));
        }
    }
    Ok(out)
}

fn hierarchy(
    index: &CodeIndex,
    symbol: &str,
    direction: HierarchyDirection,
    json: bool,
) -> anyhow::Result<String> {
    let up = match direction {
        HierarchyDirection::Up | HierarchyDirection::Both => index.find_supertypes(symbol),
        HierarchyDirection::Down => Vec::new(),
    };
    let down = match direction {
        HierarchyDirection::Down | HierarchyDirection::Both => index.find_subtypes(symbol),
        HierarchyDirection::Up => Vec::new(),
    };

    if json {
        return to_json(&json!({ "up": up, "down": down }));
    }
    let rows = up
        .iter()
        .map(|s| FieldRow::new("supertype", s))
        .chain(down.iter().map(|s| FieldRow::new("subtype", s)))
        .collect();
    Ok(render(rows, "No related types."))
}

fn parse(symbol: &str, config: &SciplensConfig, json: bool) -> anyhow::Result<String> {
    let codec = SymbolCodec::from_config(config);
    let Some(parsed) = codec.parse(symbol) else {
        bail!("'{symbol}' is not a well-formed symbol");
    };
    if json {
        return to_json(&parsed);
    }

    let mut header = vec![
        FieldRow::new("Scheme", &*parsed.scheme),
        FieldRow::new("Formatted", codec.format(&parsed)),
    ];
    if let Some(package) = &parsed.package {
        header.push(FieldRow::new("Package", package));
    }
    if !parsed.is_local() {
        header.push(FieldRow::new("Qualified name", parsed.fully_qualified_name()));
    }
    let (name, kind) = codec.infer_metadata(symbol);
    header.push(FieldRow::new("Inferred", format!("{name} ({kind})")));

    let descriptors = parsed
        .descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| DescriptorRow::new(i + 1, d))
        .collect();
    Ok(format!(
        "{}\n\n{}",
        render(header, ""),
        render(descriptors, "No descriptors.")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(args: &[&str]) -> anyhow::Result<String> {
        let mut argv = vec!["sciplens"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;
        execute(&cli, &SciplensConfig::default())
    }

    #[test]
    fn test_parse_needs_no_index() {
        let out = run(&["parse", "python pip pkg 1.0 main/Widget#run()."]).unwrap();
        assert!(out.contains("Widget"));
        assert!(out.contains("Method"));

        let out = run(&["--json", "parse", "local 7"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["scheme"], "local");
    }

    #[test]
    fn test_parse_reports_malformed_symbols() {
        let err = run(&["parse", "python pip pkg 1.0 `open"]).unwrap_err();
        assert!(err.to_string().contains("not a well-formed symbol"));
    }

    #[test]
    fn test_index_commands_require_index() {
        let err = run(&["stats"]).unwrap_err();
        assert!(err.to_string().contains("--index"));
    }
}
