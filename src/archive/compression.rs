use crate::archive::format::{BZIP_HEADER, COMPRESSION_LEVEL};
use crate::error::{JagError, Result};
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::io::{Read, Write};

/// Compress a block with bzip2 and strip the `BZh1` stream header
///
/// Archives store headerless bzip2 streams; the header is implied by the format.
pub fn compress_block(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
    encoder
        .write_all(data)
        .map_err(|e| JagError::CompressionFailed(format!("bzip2 compression failed: {}", e)))?;

    let compressed = encoder
        .finish()
        .map_err(|e| JagError::CompressionFailed(format!("bzip2 compression failed: {}", e)))?;

    match compressed.strip_prefix(&BZIP_HEADER[..]) {
        Some(body) => Ok(body.to_vec()),
        None => Err(JagError::CompressionFailed(
            "bzip2 stream is missing the expected BZh1 header".to_string(),
        )),
    }
}

/// Restore the `BZh1` header and decompress a headerless bzip2 block
///
/// Fails unless the output is exactly `expected_size` bytes. Output is read
/// no further than one byte past `expected_size`.
pub fn decompress_block(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let framed = BZIP_HEADER.iter().chain(data.iter()).copied().collect::<Vec<u8>>();

    let mut output = Vec::with_capacity(expected_size);
    BzDecoder::new(&framed[..])
        .take(expected_size as u64 + 1)
        .read_to_end(&mut output)
        .map_err(|e| JagError::DecompressionFailed(format!("bzip2 decompression failed: {}", e)))?;

    if output.len() != expected_size {
        return Err(JagError::DecompressionFailed(format!(
            "bzip2 decompression size mismatch: expected {}, got {}",
            expected_size,
            output.len()
        )));
    }

    Ok(output)
}

/// Compress `data` unless doing so does not make it strictly smaller
///
/// Returns the bytes to store. The caller detects the raw case by the
/// stored length being equal to the input length.
pub fn compress_if_smaller(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let compressed = compress_block(data)?;

    if compressed.len() < data.len() {
        Ok(compressed)
    } else {
        Ok(data.to_vec())
    }
}
