use crate::archive::buffer::JagBuffer;
use crate::error::Result;
use std::fmt;
use std::str::FromStr;

/// Archive header size in bytes (two 24-bit sizes)
pub const HEADER_SIZE: usize = 6;

/// Index record size in bytes: hash (4) + size (3) + compressed size (3)
pub const INDEX_RECORD_SIZE: usize = 10;

/// Size of the entry count field at the start of the index block
pub const ENTRY_COUNT_SIZE: usize = 2;

/// Maximum number of entries one archive can hold
pub const MAX_ENTRIES: usize = 65535;

/// Maximum size of the index block, an entry, or a compressed entry
pub const MAX_ENTRY_SIZE: usize = 16_777_215;

/// bzip2 stream magic: 'BZ', 'h' for huffman, '1' for the block size.
/// Stripped from every compressed stream stored in an archive.
pub const BZIP_HEADER: [u8; 4] = [b'B', b'Z', b'h', b'1'];

/// Compression level matching the block size advertised in `BZIP_HEADER`
pub const COMPRESSION_LEVEL: u32 = 1;

/// Convert a filename to the hash used in the archive index.
///
/// The name is upper-cased (ASCII folding) and each UTF-16 code unit is folded
/// in with `hash * 61 + c - 32`, wrapping as a 32-bit signed integer.
pub fn hash_filename(name: &str) -> i32 {
    name.to_ascii_uppercase()
        .encode_utf16()
        .fold(0i32, |hash, c| {
            hash.wrapping_mul(61)
                .wrapping_add(i32::from(c))
                .wrapping_sub(32)
        })
}

/// Identifies an entry either by filename or by its raw hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Name(String),
    Hash(i32),
}

impl EntryKey {
    /// Resolve to the hash stored in the index
    pub fn hash(&self) -> i32 {
        match self {
            Self::Name(name) => hash_filename(name),
            Self::Hash(hash) => *hash,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Hash(hash) => write!(f, "{}", hash),
        }
    }
}

impl From<&str> for EntryKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for EntryKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i32> for EntryKey {
    fn from(hash: i32) -> Self {
        Self::Hash(hash)
    }
}

/// Strings that parse as a signed 32-bit integer are raw hashes,
/// everything else is a filename.
impl FromStr for EntryKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<i32>() {
            Ok(hash) => Self::Hash(hash),
            Err(_) => Self::Name(s.to_string()),
        })
    }
}

/// Six byte header at the beginning of the archive
///
/// Equal sizes mean the body is the raw index block; otherwise the body is
/// the bzip2-compressed index block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub uncompressed_size: u32,
    pub compressed_size: u32,
}

impl ArchiveHeader {
    pub fn new(uncompressed_size: u32, compressed_size: u32) -> Self {
        Self {
            uncompressed_size,
            compressed_size,
        }
    }

    /// Whether the body holds a whole-block-compressed index
    pub fn is_compressed(&self) -> bool {
        self.uncompressed_size != self.compressed_size
    }

    pub fn read_from<T: AsRef<[u8]>>(buffer: &mut JagBuffer<T>) -> Result<Self> {
        let uncompressed_size = buffer.read_u24()?;
        let compressed_size = buffer.read_u24()?;

        Ok(Self {
            uncompressed_size,
            compressed_size,
        })
    }

    pub fn write_to<T: AsMut<[u8]>>(&self, buffer: &mut JagBuffer<T>) {
        buffer.write_u24(self.uncompressed_size);
        buffer.write_u24(self.compressed_size);
    }
}

/// Fixed ten byte record in the index block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRecord {
    pub hash: i32,
    pub size: u32,
    pub compressed_size: u32,
}

impl IndexRecord {
    /// Whether the payload for this record was individually compressed
    pub fn is_compressed(&self) -> bool {
        self.size != self.compressed_size
    }

    pub fn read_from<T: AsRef<[u8]>>(buffer: &mut JagBuffer<T>) -> Result<Self> {
        let hash = buffer.read_i32()?;
        let size = buffer.read_u24()?;
        let compressed_size = buffer.read_u24()?;

        Ok(Self {
            hash,
            size,
            compressed_size,
        })
    }

    pub fn write_to<T: AsMut<[u8]>>(&self, buffer: &mut JagBuffer<T>) {
        buffer.write_i32(self.hash);
        buffer.write_u24(self.size);
        buffer.write_u24(self.compressed_size);
    }
}

/// Offset of the first payload byte in an index block with `entry_count` records
pub fn payload_offset(entry_count: usize) -> usize {
    ENTRY_COUNT_SIZE + entry_count * INDEX_RECORD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash_filename(""), 0);
        assert_eq!(hash_filename("A"), 33);
        assert_eq!(hash_filename("AB"), 33 * 61 + 66 - 32);
    }

    #[test]
    fn test_hash_golden_values() {
        assert_eq!(hash_filename("test.txt"), -741670958);
        assert_eq!(hash_filename("death.pcm"), 1011236428);
        assert_eq!(hash_filename("sounds1.mem"), 1351695214);
        assert_eq!(hash_filename("config.jag"), -179135950);
        assert_eq!(
            hash_filename("a_very_long_filename_that_overflows_thirty_two_bits.dat"),
            -397466181
        );
    }

    #[test]
    fn test_hash_case_insensitive() {
        assert_eq!(hash_filename("test.txt"), hash_filename("TEST.TXT"));
        assert_eq!(hash_filename("Death.Pcm"), hash_filename("DEATH.PCM"));
        assert_ne!(hash_filename("a.txt"), hash_filename("b.txt"));
    }

    #[test]
    fn test_hash_wraps_like_i32() {
        let name = "a_very_long_filename_that_overflows_thirty_two_bits.dat";

        // Reference computed in 64 bits and truncated at every step
        let mut expected: i64 = 0;
        for c in name.to_ascii_uppercase().bytes() {
            expected = (expected * 61 + i64::from(c) - 32) as i32 as i64;
        }

        assert_eq!(hash_filename(name), expected as i32);
        assert_eq!(hash_filename(name), hash_filename(name));
    }

    #[test]
    fn test_entry_key_resolution() {
        assert_eq!(EntryKey::from("test.txt").hash(), hash_filename("TEST.TXT"));
        assert_eq!(EntryKey::from(-42).hash(), -42);

        let parsed: EntryKey = "-1234".parse().unwrap();
        assert_eq!(parsed, EntryKey::Hash(-1234));

        let parsed: EntryKey = "sounds.mem".parse().unwrap();
        assert_eq!(parsed, EntryKey::Name("sounds.mem".to_string()));
    }

    #[test]
    fn test_index_record_layout() {
        let record = IndexRecord {
            hash: -2,
            size: 0x010203,
            compressed_size: 0x040506,
        };

        let mut buffer = JagBuffer::with_capacity(INDEX_RECORD_SIZE);
        record.write_to(&mut buffer);
        let bytes = buffer.into_inner();

        assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 0xFE, 1, 2, 3, 4, 5, 6]);

        let parsed = IndexRecord::read_from(&mut JagBuffer::new(&bytes[..])).unwrap();
        assert_eq!(parsed, record);
        assert!(parsed.is_compressed());
    }

    #[test]
    fn test_header_signals_compression() {
        assert!(!ArchiveHeader::new(12, 12).is_compressed());
        assert!(ArchiveHeader::new(120, 40).is_compressed());
        assert_eq!(payload_offset(3), 32);
    }
}
