//! Binary reader for parsing little-endian byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads the
//! fixed-width values and count-driven arrays used by every FaceGen format.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a byte slice.
///
/// Every read is little-endian and advances the cursor. A read that needs more
/// bytes than remain fails with [`Error::UnexpectedEof`] and leaves the
/// position untouched.
///
/// # Example
///
/// ```
/// use fgbin_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u32().unwrap(), 0x08070605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size byte array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Read three little-endian i16 values.
    pub fn read_i16x3(&mut self) -> Result<[i16; 3]> {
        let bytes: [u8; 6] = self.read_array()?;
        Ok([
            i16::from_le_bytes([bytes[0], bytes[1]]),
            i16::from_le_bytes([bytes[2], bytes[3]]),
            i16::from_le_bytes([bytes[4], bytes[5]]),
        ])
    }

    /// Read `N` little-endian f32 values.
    pub fn read_f32xn<const N: usize>(&mut self) -> Result<[f32; N]> {
        let bytes = self.read_bytes(N * 4)?;
        let mut out = [0f32; N];
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(out)
    }

    /// Read `N` little-endian i32 values.
    pub fn read_i32xn<const N: usize>(&mut self) -> Result<[i32; N]> {
        let bytes = self.read_bytes(N * 4)?;
        let mut out = [0i32; N];
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(out)
    }

    /// Read `count` little-endian i16 values.
    ///
    /// The whole run is bounds-checked before anything is allocated, so a
    /// corrupt count cannot trigger a huge allocation.
    pub fn read_i16_vec(&mut self, count: usize) -> Result<Vec<i16>> {
        let bytes = self.read_bytes(Self::byte_len(count, 2)?)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect())
    }

    /// Read `count` little-endian f32 values.
    pub fn read_f32_vec(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.read_bytes(Self::byte_len(count, 4)?)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read a byte string prefixed by its u32 length.
    ///
    /// No text encoding is assumed; labels stay opaque bytes.
    pub fn read_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.position;
        let length = self.read_u32()? as usize;
        self.read_bytes(length).inspect_err(|_| self.position = start)
    }

    /// Read a byte string prefixed by a signed i32 length.
    ///
    /// Mesh files store label lengths as signed integers; negative values are
    /// rejected with [`Error::InvalidLength`].
    pub fn read_signed_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.position;
        let length = self.read_i32()?;
        let length = usize::try_from(length).map_err(|_| {
            self.position = start;
            Error::InvalidLength(length.into())
        })?;
        self.read_bytes(length).inspect_err(|_| self.position = start)
    }

    /// Read `count` records of at least `record_size` bytes each.
    ///
    /// Preallocation is capped by what the remaining input could hold, so a
    /// corrupt count fails on the first short read instead of allocating.
    pub fn read_records<T, E>(
        &mut self,
        count: usize,
        record_size: usize,
        mut read: impl FnMut(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<Vec<T>, E> {
        let capacity = count.min(self.remaining() / record_size.max(1));
        let mut records = Vec::with_capacity(capacity);
        for _ in 0..count {
            records.push(read(self)?);
        }
        Ok(records)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate and be
    /// laid out exactly as it appears on disk.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Expect specific magic bytes.
    pub fn expect_magic(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }

    fn byte_len(count: usize, width: usize) -> Result<usize> {
        count.checked_mul(width).ok_or(Error::UnexpectedEof {
            needed: usize::MAX,
            available: 0,
        })
    }
}
