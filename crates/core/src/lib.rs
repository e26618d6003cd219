pub mod error;
pub mod logging;

pub mod codec;
pub mod config;
pub mod docs;
pub mod index;
pub mod loader;
pub mod pattern;
pub mod query;

pub use error::{Result, SciplensError};

pub use codec::{SymbolCodec, format_symbol, parse_symbol};
pub use config::SciplensConfig;
pub use index::{CodeIndex, IndexBuild};
pub use loader::{IndexSource, SnapshotSource, load_snapshot, save_snapshot};
pub use query::{QueryApi, SymbolSearcher};
