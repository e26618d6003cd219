mod commands;
mod view;

use clap::{Args, Parser, Subcommand};
use sciplens_api::models::SymbolKind;
use sciplens_api::semantic::HierarchyDirection;
use sciplens_core::SciplensConfig;
use std::path::PathBuf;

pub use commands::execute;

#[derive(Parser, Debug)]
#[command(
    name = "sciplens",
    version,
    about = "Query SCIP code-intelligence snapshots from the terminal",
    long_about = "Sciplens loads a SCIP index snapshot (JSON, or MessagePack compressed with zstd) \
                  and answers definition, reference, call-graph and type-hierarchy questions about \
                  the indexed project."
)]
pub struct Cli {
    /// Snapshot to load (.json, .msgpack.zst, or sniffed from contents)
    #[arg(long, short = 'i', global = true, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Configuration file. Defaults to ~/.sciplens/config.toml when present.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Mirror logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show document, symbol and occurrence totals
    Stats,
    /// List defined symbols, optionally filtered
    #[command(
        long_about = "Lists the symbols defined in each document. Filters combine with AND; \
                            several --document globs combine with OR."
    )]
    Symbols(SymbolsArgs),
    /// Show where a symbol is defined
    Def {
        #[arg(value_name = "SYMBOL")]
        symbol: String,
    },
    /// List every reference to a symbol
    Refs {
        #[arg(value_name = "SYMBOL")]
        symbol: String,
    },
    /// List symbols whose body references the given symbol
    Callers {
        #[arg(value_name = "SYMBOL")]
        symbol: String,
    },
    /// List symbols referenced within the given symbol's definition
    Callees {
        #[arg(value_name = "SYMBOL")]
        symbol: String,
    },
    /// Find the shortest call chain between two symbols
    Path {
        #[arg(value_name = "FROM")]
        from: String,
        #[arg(value_name = "TO")]
        to: String,
        /// Longest chain to explore, in symbols
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Show supertypes and subtypes of a symbol
    Hierarchy {
        #[arg(value_name = "SYMBOL")]
        symbol: String,
        /// up, down or both
        #[arg(long, short = 'd', default_value = "both")]
        direction: HierarchyDirection,
    },
    /// Rank defined symbols by reference count
    Hotspots {
        /// Number of symbols to show. Defaults to the configured limit.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List defined symbols that are never referenced
    DeadCode {
        /// Glob over raw symbols to ignore; repeatable. Replaces the configured list.
        #[arg(long = "exclude", value_name = "GLOB")]
        excludes: Vec<String>,
    },
    /// Count functions and classes and measure function length
    Complexity {
        /// Restrict to one document
        #[arg(long, value_name = "PATH")]
        document: Option<String>,
    },
    /// Parse a raw symbol string; no index needed
    Parse {
        #[arg(value_name = "SYMBOL")]
        symbol: String,
    },
    /// Search defined symbols by name
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
        /// Rank by edit-distance similarity
        #[arg(long, conflicts_with = "prefix")]
        fuzzy: bool,
        /// Case-insensitive prefix completion
        #[arg(long)]
        prefix: bool,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Minimum similarity for --fuzzy, between 0 and 1
        #[arg(long, default_value_t = 0.6)]
        cutoff: f64,
    },
}

#[derive(Args, Debug, Default)]
pub struct SymbolsArgs {
    #[arg(long)]
    pub kind: Option<SymbolKind>,
    #[arg(long)]
    pub language: Option<String>,
    /// Display name, matched as a substring unless --exact
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, requires = "name")]
    pub exact: bool,
    /// Glob over display names, or a regex with --regex
    #[arg(long)]
    pub pattern: Option<String>,
    #[arg(long, requires = "pattern")]
    pub regex: bool,
    /// Glob over document paths; repeatable
    #[arg(long = "document", value_name = "GLOB")]
    pub documents: Vec<String>,
    /// Only symbols with documentation
    #[arg(long)]
    pub documented: bool,
    /// Only symbols with a definition occurrence
    #[arg(long)]
    pub exported: bool,
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SciplensConfig::load_or_default(cli.config.as_deref())?;
    let _guard = sciplens_core::logging::init_logging("cli", &config.log_level, cli.verbose);

    let output = execute(&cli, &config)?;
    println!("{output}");
    Ok(())
}
