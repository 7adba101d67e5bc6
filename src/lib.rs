//! jag-rs: codec for legacy JAG game-cache archives
//!
//! A JAG archive packs many files into one blob, indexed by a 32-bit hash of
//! the upper-cased filename. This library provides:
//! - Big-endian cursor buffer for the binary layout
//! - Filename hashing with exact 32-bit wraparound
//! - Per-entry or whole-block bzip2 compression
//! - In-memory entry table with name or hash lookup
//!
//! # Example
//!
//! ```no_run
//! use jag_rs::Archive;
//!
//! // Create an archive
//! let mut archive = Archive::new();
//! archive.put_entry("test.txt", b"test string".to_vec());
//! let bytes = archive.to_archive(true)?;
//!
//! // Read it back
//! let archive = Archive::from_bytes(&bytes)?;
//! assert_eq!(archive.get_entry("test.txt")?, b"test string");
//! # Ok::<(), jag_rs::error::JagError>(())
//! ```

// Core modules
pub mod archive;
pub mod error;

// Re-export commonly used types
pub use archive::{
    hash_filename, Archive, ArchiveHeader, EntryKey, IndexRecord, JagBuffer, HEADER_SIZE,
    INDEX_RECORD_SIZE, MAX_ENTRIES, MAX_ENTRY_SIZE,
};
pub use error::{JagError, Result};
