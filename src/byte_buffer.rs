//! A fixed-capacity byte region with a cursor and a configurable integer byte
//! order, in the shape of the classic `java.nio.ByteBuffer` contract. Used
//! both as a general serialization helper and as the carrier for the 32-byte
//! WOTS+ hash-address structure built in [`crate::wots_hash`].

use crate::error::{Error, WotsResult};

/// Byte order used by [`ByteBuffer::put_int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first. The default.
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

/// A fixed-capacity, cursor-addressed byte region.
#[derive(Clone)]
pub struct ByteBuffer {
    data: Vec<u8>,
    position: usize,
    order: ByteOrder,
}

impl core::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("capacity", &self.data.len())
            .field("position", &self.position)
            .field("order", &self.order)
            .finish()
    }
}

impl ByteBuffer {
    /// Allocates a zero-filled buffer of `capacity` bytes, cursor at 0,
    /// big-endian order.
    #[must_use]
    pub fn allocate(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            position: 0,
            order: ByteOrder::BigEndian,
        }
    }

    /// Copies `bytes` into a new buffer whose capacity equals `bytes.len()`,
    /// cursor at 0, big-endian order.
    #[must_use]
    pub fn wrap(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            position: 0,
            order: ByteOrder::BigEndian,
        }
    }

    /// Sets the byte order used by [`ByteBuffer::put_int`]. Builder-style.
    #[must_use]
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Total capacity of the underlying region.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Current cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to `position`. Fails if `position` is negative or
    /// greater than capacity.
    pub fn set_position(&mut self, position: i64) -> WotsResult<()> {
        if position < 0 || position as u64 > self.data.len() as u64 {
            return Err(Error::InvalidPosition {
                position,
                capacity: self.data.len(),
            });
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        {
            self.position = position as usize;
        }
        Ok(())
    }

    /// Resets the cursor to 0 without touching the contents.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Returns a copy of the entire backing region (not just the bytes
    /// written so far).
    #[must_use]
    pub fn array(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Writes a single byte at the cursor and advances it by one.
    pub fn put(&mut self, byte: u8) -> WotsResult<()> {
        if self.remaining() < 1 {
            return Err(Error::BufferOverflow {
                capacity: self.data.len(),
            });
        }
        self.data[self.position] = byte;
        self.position += 1;
        Ok(())
    }

    /// Writes the full slice at the cursor and advances it by `src.len()`.
    pub fn put_slice(&mut self, src: &[u8]) -> WotsResult<()> {
        self.put_slice_range(src, 0, src.len())
    }

    /// Writes `length` bytes of `src` starting at `offset` at the cursor and
    /// advances it by `length`.
    pub fn put_slice_range(&mut self, src: &[u8], offset: usize, length: usize) -> WotsResult<()> {
        if self.remaining() < length {
            return Err(Error::BufferOverflow {
                capacity: self.data.len(),
            });
        }
        let chunk = &src[offset..offset + length];
        self.data[self.position..self.position + length].copy_from_slice(chunk);
        self.position += length;
        Ok(())
    }

    /// Writes a 32-bit integer honoring the buffer's configured byte order,
    /// advancing the cursor by 4.
    pub fn put_int(&mut self, value: i32) -> WotsResult<()> {
        let bytes = match self.order {
            ByteOrder::BigEndian => value.to_be_bytes(),
            ByteOrder::LittleEndian => value.to_le_bytes(),
        };
        self.put_slice(&bytes)
    }

    /// Reads `dst.len()` bytes from the cursor into `dst`, advancing it.
    pub fn get(&mut self, dst: &mut [u8]) -> WotsResult<()> {
        if self.remaining() < dst.len() {
            return Err(Error::BufferUnderflow {
                capacity: self.data.len(),
            });
        }
        dst.copy_from_slice(&self.data[self.position..self.position + dst.len()]);
        self.position += dst.len();
        Ok(())
    }

    /// Reads a single byte from the cursor, advancing it by one.
    pub fn get_one(&mut self) -> WotsResult<u8> {
        if self.remaining() < 1 {
            return Err(Error::BufferUnderflow {
                capacity: self.data.len(),
            });
        }
        let byte = self.data[self.position];
        self.position += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_bounds_are_enforced() {
        let mut buf = ByteBuffer::allocate(8);
        assert!(buf.set_position(-1).is_err());
        assert!(buf.set_position(9).is_err());
        assert!(buf.set_position(8).is_ok());
        assert!(buf.set_position(0).is_ok());
    }

    #[test]
    fn put_and_get_roundtrip_and_advance_cursor() {
        let mut buf = ByteBuffer::allocate(4);
        buf.put_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(buf.position(), 4);
        assert!(buf.put(5).is_err());

        buf.rewind();
        let mut out = [0u8; 4];
        buf.get(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
        assert!(buf.get_one().is_err());
    }

    #[test]
    fn put_int_honors_configured_order() {
        let mut be = ByteBuffer::allocate(4);
        be.put_int(0x0102_0304).unwrap();
        assert_eq!(be.array(), vec![0x01, 0x02, 0x03, 0x04]);

        let mut le = ByteBuffer::allocate(4).with_order(ByteOrder::LittleEndian);
        le.put_int(0x0102_0304).unwrap();
        assert_eq!(le.array(), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn wrap_copies_input_and_starts_at_zero() {
        let src = [9u8; 16];
        let buf = ByteBuffer::wrap(&src);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.array(), src.to_vec());
    }
}
