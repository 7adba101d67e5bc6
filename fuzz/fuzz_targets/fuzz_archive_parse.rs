#![no_main]

use jag_rs::{Archive, EntryKey};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try to decode - should never panic
    let archive = match Archive::from_bytes(data) {
        Ok(a) => a,
        Err(_) => return, // Expected for invalid data
    };

    // Try to read every entry - should never panic
    let hashes: Vec<i32> = archive.hashes().to_vec();
    for hash in &hashes {
        let _ = archive.get_entry(*hash);
    }

    // Lookups by name - should never panic
    let _ = archive.has_entry("test.txt");
    let _ = archive.has_entry("");
    let _ = archive.get_entry(EntryKey::Hash(i32::MIN));

    // Whatever decoded must encode again
    let _ = archive.to_archive(true);
    let _ = archive.to_archive(false);
});
