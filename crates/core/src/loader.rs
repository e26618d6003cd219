//! Snapshot persistence for unbuilt indexes.
//!
//! Two on-disk formats are supported: plain JSON, and MessagePack compressed
//! with zstd. Decoding an index never builds it; call
//! [`IndexBuild::build`](crate::index::IndexBuild::build) on the result.

use crate::error::{Result, SciplensError};
use sciplens_api::models::Index;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Anything able to hand over an unbuilt [`Index`].
pub trait IndexSource {
    fn load(&self) -> Result<Index>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    MessagePackZstd,
}

impl SnapshotFormat {
    /// Format implied by the file name, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".json") {
            Some(SnapshotFormat::Json)
        } else if name.ends_with(".zst") {
            Some(SnapshotFormat::MessagePackZstd)
        } else {
            None
        }
    }

    /// Format implied by the leading bytes. Anything not zstd is taken as JSON.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&ZSTD_MAGIC) {
            SnapshotFormat::MessagePackZstd
        } else {
            SnapshotFormat::Json
        }
    }
}

pub fn decode_snapshot(bytes: &[u8], format: SnapshotFormat) -> Result<Index> {
    match format {
        SnapshotFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| SciplensError::Decode(e.to_string()))
        }
        SnapshotFormat::MessagePackZstd => {
            let decompressed = zstd::decode_all(bytes)
                .map_err(|e| SciplensError::Decode(format!("Zstd decompression failed: {}", e)))?;
            rmp_serde::from_slice(&decompressed)
                .map_err(|e| SciplensError::Decode(format!("MSGPACK error: {}", e)))
        }
    }
}

pub fn encode_snapshot(index: &Index, format: SnapshotFormat) -> Result<Vec<u8>> {
    match format {
        SnapshotFormat::Json => {
            serde_json::to_vec_pretty(index).map_err(|e| SciplensError::Encode(e.to_string()))
        }
        SnapshotFormat::MessagePackZstd => {
            let bytes = rmp_serde::to_vec_named(index)
                .map_err(|e| SciplensError::Encode(format!("MSGPACK error: {}", e)))?;
            zstd::encode_all(&bytes[..], 0)
                .map_err(|e| SciplensError::Encode(format!("Zstd compression failed: {}", e)))
        }
    }
}

/// Read a snapshot, choosing the format from the extension or, failing
/// that, from the file contents.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Index> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let format = SnapshotFormat::from_path(path).unwrap_or_else(|| SnapshotFormat::sniff(&bytes));
    debug!(path = %path.display(), ?format, size = bytes.len(), "decoding snapshot");

    let index = decode_snapshot(&bytes, format)?;
    info!(
        "Loaded snapshot {} with {} documents",
        path.display(),
        index.documents.len()
    );
    Ok(index)
}

/// Write a snapshot. Unknown extensions get the compressed format.
pub fn save_snapshot(index: &Index, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path).unwrap_or(SnapshotFormat::MessagePackZstd);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match format {
        SnapshotFormat::Json => {
            let writer = BufWriter::new(fs::File::create(path)?);
            serde_json::to_writer_pretty(writer, index)
                .map_err(|e| SciplensError::Encode(e.to_string()))?;
        }
        SnapshotFormat::MessagePackZstd => {
            fs::write(path, encode_snapshot(index, format)?)?;
        }
    }
    debug!(path = %path.display(), ?format, "snapshot saved");
    Ok(())
}

/// A snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
    format: Option<SnapshotFormat>,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    /// Skip detection and always decode as `format`.
    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for SnapshotSource {
    fn load(&self) -> Result<Index> {
        match self.format {
            Some(SnapshotFormat::Json) => {
                let reader = BufReader::new(fs::File::open(&self.path)?);
                serde_json::from_reader(reader).map_err(|e| SciplensError::Decode(e.to_string()))
            }
            Some(format) => decode_snapshot(&fs::read(&self.path)?, format),
            None => load_snapshot(&self.path),
        }
    }
}
