//! Header preimage layout and construction.
//!
//! The header base is 140 bytes: a 108-byte preimage followed by a 32-byte
//! nonce that the hashing engine fills in.
//!
//! | offset | size | field                  | encoding       |
//! |--------|------|------------------------|----------------|
//! | 0      | 4    | version                | little-endian  |
//! | 4      | 32   | previous block hash    | header order   |
//! | 36     | 32   | merkle root            | header order   |
//! | 68     | 32   | block commitments hash | header order   |
//! | 100    | 4    | time                   | little-endian  |
//! | 104    | 4    | bits                   | little-endian  |
//! | 108    | 32   | nonce                  | zero on build  |

use crate::encoding::to_display_hex;
use crate::error::ParseError;

/// Size of the full header base, nonce included.
pub const HEADER_BASE_SIZE: usize = 140;

/// Size of the preimage that precedes the nonce.
pub const PREIMAGE_SIZE: usize = 108;

/// Size of the nonce slot.
pub const NONCE_SIZE: usize = 32;

pub const VERSION_OFFSET: usize = 0;
pub const PREV_HASH_OFFSET: usize = 4;
pub const MERKLE_ROOT_OFFSET: usize = 36;
pub const COMMITMENTS_OFFSET: usize = 68;
pub const TIME_OFFSET: usize = 100;
pub const BITS_OFFSET: usize = 104;
pub const NONCE_OFFSET: usize = PREIMAGE_SIZE;

/// Decoded header fields, hashes already in header byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    /// Block version.
    pub version: u32,
    /// Hash of the previous block (header order).
    pub previous_block_hash: [u8; 32],
    /// Merkle root of the block's transactions (header order).
    pub merkle_root: [u8; 32],
    /// Block commitments hash (header order).
    pub block_commitments_hash: [u8; 32],
    /// Block timestamp (Unix time).
    pub time: u32,
    /// Difficulty target in compact "bits" format.
    pub bits: u32,
}

impl HeaderFields {
    /// Serialize the fields into a fresh header base with a zeroed nonce.
    ///
    /// Fails if the writer does not stop exactly at the end of the preimage.
    pub fn build(&self) -> Result<HeaderBase, ParseError> {
        let mut writer = HeaderWriter::new();

        writer.put_u32_le(self.version);
        writer.put_hash(&self.previous_block_hash);
        writer.put_hash(&self.merkle_root);
        writer.put_hash(&self.block_commitments_hash);
        writer.put_u32_le(self.time);
        writer.put_u32_le(self.bits);

        writer.finish()
    }
}

/// Sequential writer over the header buffer.
struct HeaderWriter {
    buf: [u8; HEADER_BASE_SIZE],
    cursor: usize,
}

impl HeaderWriter {
    fn new() -> Self {
        HeaderWriter {
            buf: [0u8; HEADER_BASE_SIZE],
            cursor: 0,
        }
    }

    fn put_u32_le(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    fn put_hash(&mut self, hash: &[u8; 32]) {
        self.put(hash);
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.cursor + bytes.len();
        self.buf[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
    }

    fn finish(mut self) -> Result<HeaderBase, ParseError> {
        if self.cursor != PREIMAGE_SIZE {
            return Err(ParseError::CursorMismatch {
                offset: self.cursor,
            });
        }
        self.buf[NONCE_OFFSET..].fill(0);
        Ok(HeaderBase(self.buf))
    }
}

/// The 140-byte buffer handed to the hashing engine.
///
/// The preimage is fixed once built; only the nonce slot is writable.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderBase([u8; HEADER_BASE_SIZE]);

impl HeaderBase {
    /// The full buffer, nonce included.
    pub fn as_bytes(&self) -> &[u8; HEADER_BASE_SIZE] {
        &self.0
    }

    /// The 108-byte preimage.
    pub fn preimage(&self) -> &[u8] {
        &self.0[..PREIMAGE_SIZE]
    }

    /// The 32-byte nonce slot.
    pub fn nonce(&self) -> &[u8] {
        &self.0[NONCE_OFFSET..]
    }

    /// Mutable access to the nonce slot.
    pub fn nonce_mut(&mut self) -> &mut [u8] {
        &mut self.0[NONCE_OFFSET..]
    }

    /// Split into the immutable preimage and the mutable nonce slot.
    pub fn split_nonce_mut(&mut self) -> (&[u8], &mut [u8]) {
        let (preimage, nonce) = self.0.split_at_mut(NONCE_OFFSET);
        (preimage, nonce)
    }

    /// Overwrite the nonce slot.
    pub fn set_nonce(&mut self, nonce: &[u8; NONCE_SIZE]) {
        self.nonce_mut().copy_from_slice(nonce);
    }

    /// A copy of the buffer with `nonce` in place, ready for submission.
    pub fn with_nonce(&self, nonce: &[u8; NONCE_SIZE]) -> [u8; HEADER_BASE_SIZE] {
        let mut header = self.0;
        header[NONCE_OFFSET..].copy_from_slice(nonce);
        header
    }

    /// Hex of the full buffer.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Version as written at offset 0.
    pub fn version(&self) -> u32 {
        self.read_u32_le(VERSION_OFFSET)
    }

    /// Previous block hash rendered as display hex.
    pub fn previous_block_hash_hex(&self) -> String {
        to_display_hex(&self.read_hash(PREV_HASH_OFFSET))
    }

    /// Time as written at offset 100.
    pub fn time(&self) -> u32 {
        self.read_u32_le(TIME_OFFSET)
    }

    /// Bits as written at offset 104.
    pub fn bits(&self) -> u32 {
        self.read_u32_le(BITS_OFFSET)
    }

    fn read_u32_le(&self, offset: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.0[offset..offset + 4]);
        u32::from_le_bytes(bytes)
    }

    fn read_hash(&self, offset: usize) -> [u8; 32] {
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&self.0[offset..offset + 32]);
        hash
    }
}

impl AsRef<[u8]> for HeaderBase {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for HeaderBase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("HeaderBase").field(&self.to_hex()).finish()
    }
}
