mod common;

use common::{shop_index, sym};
use sciplens_api::semantic::ReferenceAnalyzer;
use sciplens_core::loader::{SnapshotFormat, decode_snapshot, encode_snapshot};
use sciplens_core::{IndexBuild, IndexSource, SciplensError, SnapshotSource, load_snapshot, save_snapshot};
use tempfile::TempDir;

#[test]
fn given_json_snapshot_when_saved_and_loaded_then_index_is_unchanged() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("shop.json");
    let original = shop_index();

    save_snapshot(&original, &path).expect("save json");
    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.trim_start().starts_with('{'));

    let loaded = load_snapshot(&path).expect("load json");
    assert_eq!(loaded, original);
}

#[test]
fn given_compressed_snapshot_when_saved_and_loaded_then_index_is_unchanged() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("shop.msgpack.zst");
    let original = shop_index();

    save_snapshot(&original, &path).expect("save compressed");
    let bytes = std::fs::read(&path).expect("read back");
    assert_eq!(SnapshotFormat::sniff(&bytes), SnapshotFormat::MessagePackZstd);

    let index = SnapshotSource::new(&path).load().expect("load compressed").build();
    let checkout = sym("shop/service/OrderService#checkout().");
    assert_eq!(index.find_references(&checkout).len(), 2);
}

#[test]
fn given_unknown_extension_when_loading_then_format_is_sniffed() {
    let dir = TempDir::new().expect("temp dir");
    let original = shop_index();

    let compressed = dir.path().join("shop.bin");
    std::fs::write(
        &compressed,
        encode_snapshot(&original, SnapshotFormat::MessagePackZstd).expect("encode"),
    )
    .expect("write");
    assert_eq!(load_snapshot(&compressed).expect("sniffed zstd"), original);

    let json = dir.path().join("shop.snapshot");
    std::fs::write(
        &json,
        encode_snapshot(&original, SnapshotFormat::Json).expect("encode"),
    )
    .expect("write");
    assert_eq!(load_snapshot(&json).expect("sniffed json"), original);
}

#[test]
fn given_forced_format_when_loading_then_detection_is_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("shop.zst");
    save_snapshot(&shop_index(), &path).expect("save");

    let err = SnapshotSource::new(&path)
        .with_format(SnapshotFormat::Json)
        .load()
        .unwrap_err();
    assert!(matches!(err, SciplensError::Decode(_)));
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_snapshot(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SciplensError::Io(_)));
}

#[test]
fn given_minimal_json_when_decoded_then_defaults_fill_the_gaps() {
    let json = br#"{
        "documents": [{
            "relative_path": "a.py",
            "language": "python",
            "occurrences": [{"range": [0, 0, 3], "symbol": "local 1", "symbol_roles": 1}]
        }]
    }"#;
    let index = decode_snapshot(json, SnapshotFormat::Json)
        .expect("decode")
        .build();
    assert!(index.find_definition("local 1").is_some());
    assert!(index.external_symbols().is_empty());
}
