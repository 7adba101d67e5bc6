//! Integration tests for jag-rs library

use jag_rs::{hash_filename, Archive, EntryKey, JagError};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::collections::HashMap;
use tempfile::NamedTempFile;

/// Helper: Build a table of mixed compressible and random payloads
fn sample_table(rng: &mut StdRng) -> HashMap<String, Vec<u8>> {
    let mut table = HashMap::new();
    table.insert("empty.dat".to_string(), Vec::new());
    table.insert("one.dat".to_string(), vec![0x42]);
    table.insert(
        "text.txt".to_string(),
        b"This is test data that should compress well. ".repeat(200),
    );

    for i in 0..16 {
        let len = rng.gen_range(0..8192);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        table.insert(format!("random{}.bin", i), data);
    }

    table
}

fn build_archive(table: &HashMap<String, Vec<u8>>) -> Archive {
    let mut archive = Archive::new();
    for (name, data) in table {
        archive.put_entry(name, data.clone());
    }
    archive
}

#[test]
fn test_basic_archive_roundtrip() {
    let mut archive = Archive::new();
    archive.put_entry("test.txt", b"test string".to_vec());

    let bytes = archive.to_archive(true).unwrap();
    let decoded = Archive::from_bytes(&bytes).unwrap();

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.get_entry("test.txt").unwrap(), b"test string");
    assert_eq!(
        decoded.get_entry(hash_filename("TEST.TXT")).unwrap(),
        decoded.get_entry("test.txt").unwrap()
    );
}

#[test]
fn test_roundtrip_both_compression_modes() {
    let mut rng = StdRng::seed_from_u64(0x4A41_4721);
    let table = sample_table(&mut rng);
    let archive = build_archive(&table);

    let individual = archive.to_archive(true).unwrap();
    let whole = archive.to_archive(false).unwrap();
    assert_ne!(individual, whole);

    for bytes in [&individual, &whole] {
        let decoded = Archive::from_bytes(bytes).unwrap();
        assert_eq!(decoded.len(), table.len());

        for (name, data) in &table {
            assert_eq!(decoded.get_entry(name.as_str()).unwrap(), data.as_slice());
        }
    }
}

#[test]
fn test_roundtrip_preserves_order() {
    let mut archive = Archive::new();
    for name in ["c.dat", "a.dat", "b.dat"] {
        archive.put_entry(name, name.as_bytes().to_vec());
    }

    let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.hashes(), archive.hashes());
}

#[test]
fn test_reencode_is_stable() {
    let mut rng = StdRng::seed_from_u64(7);
    let archive = build_archive(&sample_table(&mut rng));

    let first = archive.to_archive(false).unwrap();
    let second = Archive::from_bytes(&first)
        .unwrap()
        .to_archive(false)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_incompressible_entry_stored_raw() {
    let mut rng = StdRng::seed_from_u64(99);
    let noise: Vec<u8> = (0..256).map(|_| rng.gen()).collect();

    let mut archive = Archive::new();
    archive.put_entry("noise.bin", noise.clone());
    let bytes = archive.to_archive(true).unwrap();

    // header (6) + count (2) + record (10) + raw payload
    assert_eq!(bytes.len(), 6 + 2 + 10 + noise.len());
    assert_eq!(&bytes[18..], noise.as_slice());

    let decoded = Archive::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.get_entry("noise.bin").unwrap(), noise.as_slice());
}

#[test]
fn test_missing_entry() {
    let mut archive = Archive::new();
    archive.put_entry("test.txt", b"test string".to_vec());
    let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();

    match decoded.get_entry("nosuch.txt") {
        Err(JagError::EntryNotFound { hash, .. }) => {
            assert_eq!(hash, hash_filename("nosuch.txt"));
        }
        other => panic!("Expected EntryNotFound, got: {:?}", other),
    }
    assert!(!decoded.has_entry("nosuch.txt"));
}

#[test]
fn test_no_decoded_data() {
    let archive = Archive::new();
    assert!(matches!(
        archive.get_entry("test.txt"),
        Err(JagError::NoDecodedData)
    ));
    assert!(matches!(
        archive.get_entry(EntryKey::Hash(1)),
        Err(JagError::NoDecodedData)
    ));
}

#[test]
fn test_remove_then_roundtrip() {
    let mut archive = Archive::new();
    archive.put_entry("keep.txt", b"keep".to_vec());
    archive.put_entry("drop.txt", b"drop".to_vec());
    archive.remove_entry("DROP.TXT").unwrap();

    let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.len(), 1);
    assert!(decoded.has_entry("keep.txt"));
    assert!(!decoded.has_entry("drop.txt"));
}

#[test]
fn test_file_save_and_open() {
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    let mut archive = Archive::new();
    archive.put_entry("death.pcm", vec![0x80; 4096]);
    archive.save(path, false).unwrap();

    let reopened = Archive::open(path).unwrap();
    assert_eq!(reopened.get_entry("death.pcm").unwrap(), vec![0x80; 4096].as_slice());
}

#[test]
fn test_open_or_default_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.jag");

    let archive = Archive::open_or_default(&path).unwrap();
    assert!(archive.is_empty());

    // Missing file is fine, missing archive data inside an existing file is not
    std::fs::write(&path, [0u8, 0, 9]).unwrap();
    assert!(Archive::open_or_default(&path).is_err());
}
