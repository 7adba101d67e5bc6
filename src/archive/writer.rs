use crate::archive::buffer::JagBuffer;
use crate::archive::compression::compress_if_smaller;
use crate::archive::entries::Archive;
use crate::archive::format::{
    payload_offset, ArchiveHeader, IndexRecord, HEADER_SIZE, MAX_ENTRIES, MAX_ENTRY_SIZE,
};
use crate::error::{JagError, Result};

impl Archive {
    /// Encode the archive with each entry compressed individually
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_archive(true)
    }

    /// Encode the entries to a JAG archive
    ///
    /// With `individual_compress` each payload is compressed on its own and the
    /// index block is stored as-is. Otherwise payloads are stored raw and the
    /// whole index block is compressed in one pass.
    pub fn to_archive(&self, individual_compress: bool) -> Result<Vec<u8>> {
        let index = self.write_entries(individual_compress)?;
        let index_size = index.len();

        // Entries are already individually compressed
        let body = if individual_compress {
            index
        } else {
            compress_if_smaller(&index)?
        };

        if body.len() > MAX_ENTRY_SIZE {
            return Err(JagError::ArchiveTooLarge(body.len()));
        }

        tracing::debug!(
            entries = self.len(),
            index_size,
            body_size = body.len(),
            individual_compress,
            "encoded archive"
        );

        let mut header = JagBuffer::with_capacity(HEADER_SIZE);
        ArchiveHeader::new(index_size as u32, body.len() as u32).write_to(&mut header);

        let mut out = header.into_inner();
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Build the uncompressed index block: count, records, then payloads
    fn write_entries(&self, individual_compress: bool) -> Result<Vec<u8>> {
        if self.len() > MAX_ENTRIES {
            return Err(JagError::TooManyEntries(self.len()));
        }

        let mut stored_entries = Vec::with_capacity(self.len());
        let mut stored_size = 0usize;

        for (hash, data) in self.entries() {
            if data.len() > MAX_ENTRY_SIZE {
                return Err(JagError::EntryTooLarge {
                    hash,
                    size: data.len(),
                });
            }

            let stored = if individual_compress {
                compress_if_smaller(data)?
            } else {
                data.to_vec()
            };

            if stored.len() > MAX_ENTRY_SIZE {
                return Err(JagError::EntryTooLarge {
                    hash,
                    size: stored.len(),
                });
            }

            stored_size += stored.len();
            stored_entries.push((
                IndexRecord {
                    hash,
                    size: data.len() as u32,
                    compressed_size: stored.len() as u32,
                },
                stored,
            ));
        }

        let index_size = payload_offset(self.len()) + stored_size;
        if index_size > MAX_ENTRY_SIZE {
            return Err(JagError::ArchiveTooLarge(index_size));
        }

        let mut records = JagBuffer::with_capacity(index_size);
        records.write_u16(self.len() as u16);

        let mut entry_offset = payload_offset(self.len());

        for (record, stored) in &stored_entries {
            record.write_to(&mut records);

            let record_end = records.position();
            records.set_position(entry_offset);
            records.write_bytes(stored);
            entry_offset = records.position();
            records.set_position(record_end);
        }

        Ok(records.into_inner())
    }
}
