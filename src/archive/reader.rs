use crate::archive::buffer::JagBuffer;
use crate::archive::compression::decompress_block;
use crate::archive::entries::Archive;
use crate::archive::format::{payload_offset, ArchiveHeader, IndexRecord, HEADER_SIZE};
use crate::error::{JagError, Result};
use std::borrow::Cow;
use std::collections::HashMap;

impl Archive {
    /// Decompress an archive and replace the entry table with its contents
    ///
    /// The table is only swapped in once the whole buffer decodes; on error the
    /// previous entries are left untouched.
    pub fn read_archive(&mut self, buffer: &[u8]) -> Result<()> {
        let mut header_buffer = JagBuffer::new(buffer.get(..HEADER_SIZE).unwrap_or(buffer));
        let header = ArchiveHeader::read_from(&mut header_buffer)?;

        let body = &buffer[HEADER_SIZE..];
        let index = Self::read_index_block(&header, body)?;

        let (entries, entry_list) = Self::read_entries(&index)?;

        tracing::debug!(
            entries = entry_list.len(),
            uncompressed_size = header.uncompressed_size,
            compressed_size = header.compressed_size,
            whole_block = header.is_compressed(),
            "decoded archive"
        );

        self.entries = entries;
        self.entry_list = entry_list;
        self.loaded = true;
        Ok(())
    }

    /// Get the index block from the body, decompressing it if needed
    fn read_index_block<'a>(header: &ArchiveHeader, body: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let compressed_size = header.compressed_size as usize;

        let body = body.get(..compressed_size).ok_or_else(|| {
            JagError::MalformedArchive(format!(
                "body is {} bytes but header declares {}",
                body.len(),
                compressed_size
            ))
        })?;

        if header.is_compressed() {
            let index = decompress_block(body, header.uncompressed_size as usize)?;
            Ok(Cow::Owned(index))
        } else {
            Ok(Cow::Borrowed(body))
        }
    }

    /// Walk the index records, pairing each with its payload slice in order
    fn read_entries(index: &[u8]) -> Result<(HashMap<i32, Vec<u8>>, Vec<i32>)> {
        let mut records = JagBuffer::new(index);
        let entry_count = records.read_u16()? as usize;

        let mut payloads = JagBuffer::new(index);
        payloads.set_position(payload_offset(entry_count));

        let mut entries = HashMap::with_capacity(entry_count);
        let mut entry_list = Vec::with_capacity(entry_count);

        for _ in 0..entry_count {
            let record = IndexRecord::read_from(&mut records)?;
            let stored = payloads.read_bytes(record.compressed_size as usize, None)?;

            let data = if record.is_compressed() {
                decompress_block(stored, record.size as usize)?
            } else {
                stored.to_vec()
            };

            tracing::trace!(
                hash = record.hash,
                size = record.size,
                compressed_size = record.compressed_size,
                "read entry"
            );

            if entries.insert(record.hash, data).is_none() {
                entry_list.push(record.hash);
            }
        }

        Ok((entries, entry_list))
    }
}
