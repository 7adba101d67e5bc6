//! jag CLI
//!
//! Thin wrapper around the jag-rs library that extracts, adds, deletes and
//! lists entries in .jag/.mem archives, and hashes filenames.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jag_rs::{hash_filename, Archive, EntryKey};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Manage JAG cache archives
#[derive(Parser, Debug)]
#[command(name = "jag", version, about = "Manage JAG cache archives")]
struct Cli {
    /// Logging level, overridden by RUST_LOG
    #[arg(short, long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract entries from an archive
    #[command(visible_alias = "x")]
    Extract {
        /// The .jag or .mem archive file
        archive: PathBuf,

        /// Filenames or hashes within the archive
        #[arg(required = true, allow_negative_numbers = true)]
        entries: Vec<String>,

        /// Files to write to, one per entry (defaults to the entry names)
        #[arg(short, long, num_args = 1..)]
        output: Vec<PathBuf>,
    },

    /// Add files to an archive, creating it if needed
    #[command(visible_alias = "a")]
    Add {
        /// The .jag or .mem archive file
        archive: PathBuf,

        /// Files to add, keyed by their base name
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Compress files in one block rather than individually
        #[arg(short, long)]
        group: bool,
    },

    /// Remove entries from an archive
    #[command(visible_alias = "d")]
    Delete {
        /// The .jag or .mem archive file
        archive: PathBuf,

        /// Filenames or hashes within the archive
        #[arg(required = true, allow_negative_numbers = true)]
        entries: Vec<String>,
    },

    /// List hashes and sizes in an archive
    #[command(visible_alias = "l")]
    List {
        /// The .jag or .mem archive file
        archive: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the integer hash of a filename
    #[command(visible_alias = "h")]
    Hash {
        /// The string to hash
        name: String,
    },
}

/// One row of the `list` output
#[derive(Debug, Serialize)]
struct EntrySummary {
    hash: i32,
    hex: String,
    size: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = Level::from(cli.log_level).to_string().to_lowercase();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            archive,
            entries,
            output,
        } => extract(&archive, &entries, &output),
        Commands::Add {
            archive,
            files,
            group,
        } => add(&archive, &files, !group),
        Commands::Delete { archive, entries } => delete(&archive, &entries),
        Commands::List { archive, json } => list(&archive, json),
        Commands::Hash { name } => {
            println!("{}", hash_filename(&name));
            Ok(())
        }
    }
}

fn parse_key(value: &str) -> EntryKey {
    match value.parse() {
        Ok(key) => key,
        Err(never) => match never {},
    }
}

fn extract(archive_path: &Path, entries: &[String], output: &[PathBuf]) -> Result<()> {
    let outputs: Vec<PathBuf> = if output.is_empty() {
        entries.iter().map(PathBuf::from).collect()
    } else {
        output.to_vec()
    };

    if outputs.len() != entries.len() {
        bail!(
            "invalid number of output names: {} (entries) != {} (output)",
            entries.len(),
            outputs.len()
        );
    }

    let archive = Archive::open(archive_path)
        .with_context(|| format!("failed to read archive {}", archive_path.display()))?;

    for (entry, out_path) in entries.iter().zip(&outputs) {
        let data = archive.get_entry(parse_key(entry))?;
        fs::write(out_path, data)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::info!(entry = %entry, path = %out_path.display(), size = data.len(), "extracted");
    }

    Ok(())
}

fn add(archive_path: &Path, files: &[PathBuf], individual_compress: bool) -> Result<()> {
    let mut archive = Archive::open_or_default(archive_path)
        .with_context(|| format!("failed to read archive {}", archive_path.display()))?;

    for file in files {
        let name = file
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("invalid file name: {}", file.display()))?;
        let data = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

        tracing::info!(name, size = data.len(), "adding entry");
        archive.put_entry(name, data);
    }

    archive
        .save(archive_path, individual_compress)
        .with_context(|| format!("failed to write archive {}", archive_path.display()))?;

    Ok(())
}

fn delete(archive_path: &Path, entries: &[String]) -> Result<()> {
    let mut archive = Archive::open(archive_path)
        .with_context(|| format!("failed to read archive {}", archive_path.display()))?;

    for entry in entries {
        archive.remove_entry(parse_key(entry))?;
        tracing::info!(entry = %entry, "removed entry");
    }

    archive
        .save(archive_path, true)
        .with_context(|| format!("failed to write archive {}", archive_path.display()))?;

    Ok(())
}

fn list(archive_path: &Path, json: bool) -> Result<()> {
    let archive = Archive::open(archive_path)
        .with_context(|| format!("failed to read archive {}", archive_path.display()))?;

    let summaries: Vec<EntrySummary> = archive
        .entries()
        .map(|(hash, data)| EntrySummary {
            hash,
            hex: hex::encode(hash.to_be_bytes()),
            size: data.len(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("hash\t\thex\t\tsize");
    for summary in &summaries {
        println!(
            "{}\t{}\t{} ({})",
            summary.hash,
            summary.hex,
            summary.size,
            format_bytes(summary.size as u64)
        );
    }

    Ok(())
}

/// Format bytes in human-readable format
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
