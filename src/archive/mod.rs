mod buffer;
mod compression;
mod entries;
mod format;
mod reader;
mod writer;

pub use buffer::JagBuffer;
pub use compression::{compress_block, compress_if_smaller, decompress_block};
pub use entries::Archive;
pub use format::{
    hash_filename, payload_offset, ArchiveHeader, EntryKey, IndexRecord, BZIP_HEADER,
    COMPRESSION_LEVEL, ENTRY_COUNT_SIZE, HEADER_SIZE, INDEX_RECORD_SIZE, MAX_ENTRIES,
    MAX_ENTRY_SIZE,
};
