use std::io;
use thiserror::Error;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, JagError>;

/// Unified error type for all archive operations
#[derive(Debug, Error)]
pub enum JagError {
    // Decode errors
    #[error("Read out of bounds: {length} bytes at offset {offset} (buffer size {size})")]
    OutOfBounds {
        offset: usize,
        length: usize,
        size: usize,
    },

    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    // Encode errors
    #[error("Too many entries for archive: {0} (max 65535)")]
    TooManyEntries(usize),

    #[error("Entry {hash} is too big for archive: {size} bytes (max 16777215)")]
    EntryTooLarge { hash: i32, size: usize },

    #[error("Index block is too big for archive: {0} bytes (max 16777215)")]
    ArchiveTooLarge(usize),

    // Accessor errors
    #[error("Entry {name} ({hash}) not found")]
    EntryNotFound { name: String, hash: i32 },

    #[error("No decoded data found")]
    NoDecodedData,

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
