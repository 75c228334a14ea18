//! Error type shared by every module in this crate.

/// Errors used throughout this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A byte buffer, tag, seed, or key argument had the wrong length.
    #[error("invalid length for {field}: expected {expected}, got {got}")]
    InvalidLength {
        /// Name of the field or argument that failed the length check.
        field: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
    /// A legacy 12-byte tag failed the validity rule (wrong length, or first
    /// byte is `0x00`/`0x42`).
    #[error("invalid tag")]
    InvalidTag,
    /// A `ByteBuffer` write ran past its capacity.
    #[error("buffer overflow: attempted to write past capacity {capacity}")]
    BufferOverflow {
        /// Capacity of the buffer that overflowed.
        capacity: usize,
    },
    /// A `ByteBuffer` read ran past the end of the written region.
    #[error("buffer underflow: attempted to read past capacity {capacity}")]
    BufferUnderflow {
        /// Capacity of the buffer that underflowed.
        capacity: usize,
    },
    /// `ByteBuffer::position` was called with an index outside `0..=capacity`.
    #[error("invalid position {position} for buffer of capacity {capacity}")]
    InvalidPosition {
        /// The rejected position.
        position: i64,
        /// Capacity of the buffer.
        capacity: usize,
    },
    /// A base58 tag string was malformed or decoded to the wrong length.
    #[error("invalid base58 tag")]
    InvalidBase58,
    /// A base58 tag decoded to the right shape but its CRC-16 did not match
    /// the recomputed checksum.
    #[error("base58 tag checksum mismatch")]
    ChecksumMismatch,
    /// Reserved for the datagram/transaction framing layer that sits above
    /// this crate; never produced internally.
    #[error("invalid operation code: {0}")]
    InvalidOperationCode(u16),
}

/// Result type used by this crate.
pub type WotsResult<T> = Result<T, Error>;
