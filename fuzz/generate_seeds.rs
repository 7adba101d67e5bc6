//! Generate seed corpus for fuzzing

use jag_rs::Archive;
use std::fs;

fn write_seed(name: &str, archive: &Archive, individual: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = format!("fuzz/corpus/fuzz_archive_parse/{}", name);
    fs::write(&path, archive.to_archive(individual)?)?;
    println!("Generated: {}", path);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("fuzz/corpus/fuzz_archive_parse")?;

    println!("Generating seed corpus...");

    // Empty archive (no entries)
    write_seed("seed_empty.jag", &Archive::new(), true)?;

    // Single small raw entry
    let mut single = Archive::new();
    single.put_entry("test.txt", b"test string".to_vec());
    write_seed("seed_single_small.jag", &single, true)?;

    // Compressible entries, both compression modes
    let mut multi = Archive::new();
    multi.put_entry("file1.txt", b"First file ".repeat(64));
    multi.put_entry("file2.txt", b"Second file ".repeat(64));
    multi.put_entry("sounds.dat", vec![0x80; 4096]);
    write_seed("seed_multi_individual.jag", &multi, true)?;
    write_seed("seed_multi_grouped.jag", &multi, false)?;

    println!("Seed corpus generation complete!");
    Ok(())
}
