use crate::archive::format::{hash_filename, EntryKey};
use crate::error::{JagError, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// In-memory JAG archive: a table of payloads keyed by filename hash
///
/// Entries keep the order they were first inserted in, which is the order
/// they are written back out.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    pub(crate) entries: HashMap<i32, Vec<u8>>,
    pub(crate) entry_list: Vec<i32>,
    pub(crate) loaded: bool,
}

impl Archive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an archive from a byte buffer
    pub fn from_bytes(buffer: &[u8]) -> Result<Self> {
        let mut archive = Self::new();
        archive.read_archive(buffer)?;
        Ok(archive)
    }

    /// Read and decode an archive file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let buffer = fs::read(path)?;
        Self::from_bytes(&buffer)
    }

    /// Read an archive file, or start an empty archive if the file does not exist
    ///
    /// Any other I/O or decode failure is still returned.
    pub fn open_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match fs::read(path) {
            Ok(buffer) => Self::from_bytes(&buffer),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Encode the archive and write it to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P, individual_compress: bool) -> Result<()> {
        let bytes = self.to_archive(individual_compress)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entry_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_list.is_empty()
    }

    /// Entry hashes in table order
    pub fn hashes(&self) -> &[i32] {
        &self.entry_list
    }

    /// Iterate `(hash, payload)` pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (i32, &[u8])> + '_ {
        self.entry_list
            .iter()
            .filter_map(move |hash| self.entries.get(hash).map(|data| (*hash, data.as_slice())))
    }

    /// Check if an entry exists; never fails
    pub fn has_entry<K: Into<EntryKey>>(&self, key: K) -> bool {
        self.entries.contains_key(&key.into().hash())
    }

    /// Read an entry's payload by filename or hash
    pub fn get_entry<K: Into<EntryKey>>(&self, key: K) -> Result<&[u8]> {
        if !self.loaded {
            return Err(JagError::NoDecodedData);
        }

        let key = key.into();
        let hash = key.hash();

        self.entries
            .get(&hash)
            .map(Vec::as_slice)
            .ok_or_else(|| JagError::EntryNotFound {
                name: key.to_string(),
                hash,
            })
    }

    /// Add or replace an entry by filename
    ///
    /// Sizes are not validated until the archive is encoded.
    pub fn put_entry<D: Into<Vec<u8>>>(&mut self, name: &str, data: D) {
        self.insert(hash_filename(name), data.into());
    }

    /// Remove an entry by filename or hash, returning its payload
    pub fn remove_entry<K: Into<EntryKey>>(&mut self, key: K) -> Result<Vec<u8>> {
        let key = key.into();
        let hash = key.hash();

        let data = self
            .entries
            .remove(&hash)
            .ok_or_else(|| JagError::EntryNotFound {
                name: key.to_string(),
                hash,
            })?;

        self.entry_list.retain(|&h| h != hash);
        Ok(data)
    }

    /// Insert keeping the first-seen position for repeated hashes
    pub(crate) fn insert(&mut self, hash: i32, data: Vec<u8>) {
        if self.entries.insert(hash, data).is_none() {
            self.entry_list.push(hash);
        }
        self.loaded = true;
    }
}

impl fmt::Display for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JagArchive ({} entries)", self.len())
    }
}
