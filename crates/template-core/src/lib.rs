//! Junocash block template decoding for RandomX mining.
//!
//! This crate turns a `getblocktemplate` response into what a proof-of-work
//! engine hashes:
//! - Compact "bits" expansion into a 256-bit big-endian target
//! - The 140-byte header base (108-byte preimage plus a 32-byte nonce slot)
//! - RandomX seed hashes and the raw transaction hex needed for submission

pub mod difficulty;
pub mod encoding;
pub mod error;
pub mod fields;
pub mod header;
pub mod template;

pub use difficulty::{compact_to_target, hash_meets_target, target_to_hex};
pub use error::ParseError;
pub use header::{HeaderBase, HeaderFields, HEADER_BASE_SIZE, NONCE_SIZE, PREIMAGE_SIZE};
pub use template::Template;
