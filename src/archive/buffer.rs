use crate::error::{JagError, Result};

/// Big-endian cursor over a fixed byte region
///
/// Reads are bounds-checked and fail with `OutOfBounds`. Writes are not: the
/// writer sizes the region exactly before writing, so overrunning it is a bug.
#[derive(Debug)]
pub struct JagBuffer<T> {
    data: T,
    position: usize,
}

impl<T> JagBuffer<T> {
    pub fn new(data: T) -> Self {
        Self { data, position: 0 }
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

impl JagBuffer<Vec<u8>> {
    /// Allocate a zeroed region for writing
    pub fn with_capacity(size: usize) -> Self {
        Self::new(vec![0u8; size])
    }
}

impl<T: AsRef<[u8]>> JagBuffer<T> {
    /// Total length of the region, independent of the cursor
    pub fn size(&self) -> usize {
        self.data.as_ref().len()
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let start = self.position;
        let bytes = self
            .data
            .as_ref()
            .get(start..start.saturating_add(N))
            .ok_or(JagError::OutOfBounds {
                offset: start,
                length: N,
                size: self.size(),
            })?;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.position += N;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take::<2>()?))
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        let [a, b, c] = self.take::<3>()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take::<4>()?))
    }

    /// Read `length` bytes starting at `start`, or at the cursor when `None`.
    ///
    /// The cursor advances by `length` even when an explicit start is given.
    /// Existing tooling depends on this, so it is kept as-is.
    pub fn read_bytes(&mut self, length: usize, start: Option<usize>) -> Result<&[u8]> {
        let start = start.unwrap_or(self.position);
        let size = self.size();

        let end = start
            .checked_add(length)
            .filter(|&end| end <= size)
            .ok_or(JagError::OutOfBounds {
                offset: start,
                length,
                size,
            })?;

        self.position += length;
        Ok(&self.data.as_ref()[start..end])
    }
}

impl<T: AsMut<[u8]>> JagBuffer<T> {
    pub fn write_u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.put(&value.to_be_bytes());
    }

    /// Writes the low 24 bits of `value`
    pub fn write_u24(&mut self, value: u32) {
        self.put(&value.to_be_bytes()[1..]);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.put(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    fn put(&mut self, bytes: &[u8]) {
        let start = self.position;
        self.data.as_mut()[start..start + bytes.len()].copy_from_slice(bytes);
        self.position += bytes.len();
    }
}
