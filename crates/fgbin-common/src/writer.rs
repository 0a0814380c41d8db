//! Binary writer producing little-endian output.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::Result;

/// A little-endian writer over any [`Write`] sink.
///
/// Tracks the number of bytes written so callers can assert section sizes.
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    inner: W,
    position: u64,
}

impl BinaryWriter<Vec<u8>> {
    /// Create a writer backed by an in-memory buffer.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    /// Create an in-memory writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Vec::with_capacity(capacity))
    }
}

impl<W: Write> BinaryWriter<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Write a little-endian i16.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.inner.write_i16::<LittleEndian>(value)?;
        self.position += 2;
        Ok(())
    }

    /// Write a little-endian u32.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.inner.write_u32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a little-endian i32.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.inner.write_i32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a little-endian f32.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.inner.write_f32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a run of i16 values.
    pub fn write_i16_slice(&mut self, values: &[i16]) -> Result<()> {
        for &value in values {
            self.write_i16(value)?;
        }
        Ok(())
    }

    /// Write a run of f32 values.
    pub fn write_f32_slice(&mut self, values: &[f32]) -> Result<()> {
        for &value in values {
            self.write_f32(value)?;
        }
        Ok(())
    }

    /// Write a byte string prefixed by its u32 length.
    pub fn write_prefixed_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.write_u32(data.len() as u32)?;
        self.write_bytes(data)
    }
}
