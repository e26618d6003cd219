//! Runtime configuration, read from `~/.sciplens/config.toml`.

use crate::error::{Result, SciplensError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PARSE_CACHE_CAPACITY: usize = 50_000;
pub const DEFAULT_CALL_PATH_MAX_DEPTH: usize = 10;
pub const DEFAULT_DEAD_CODE_EXCLUDES: &[&str] = &["*__init__*", "*main*", "*test*", "*Test*"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SciplensConfig {
    /// Entries kept by the symbol parse cache before half of them are evicted
    #[serde(default = "default_parse_cache_capacity")]
    pub parse_cache_capacity: usize,

    /// Longest call chain, in symbols, that a call-path search explores
    #[serde(default = "default_call_path_max_depth")]
    pub call_path_max_depth: usize,

    /// Glob patterns over raw symbols never reported as dead code
    #[serde(default = "default_dead_code_excludes")]
    pub dead_code_excludes: Vec<String>,

    #[serde(default = "default_hotspot_limit")]
    pub hotspot_limit: usize,

    /// Fallback filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_parse_cache_capacity() -> usize {
    DEFAULT_PARSE_CACHE_CAPACITY
}

fn default_call_path_max_depth() -> usize {
    DEFAULT_CALL_PATH_MAX_DEPTH
}

fn default_dead_code_excludes() -> Vec<String> {
    DEFAULT_DEAD_CODE_EXCLUDES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_hotspot_limit() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SciplensConfig {
    fn default() -> Self {
        Self {
            parse_cache_capacity: default_parse_cache_capacity(),
            call_path_max_depth: default_call_path_max_depth(),
            dead_code_excludes: default_dead_code_excludes(),
            hotspot_limit: default_hotspot_limit(),
            log_level: default_log_level(),
        }
    }
}

impl SciplensConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SciplensError::Config(format!("failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SciplensError::Config(format!("failed to parse config file: {}", e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sciplens").join("config.toml"))
    }

    /// Load `explicit` if given, else the default path when it exists, else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
