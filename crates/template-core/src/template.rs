//! Block template decoding.
//!
//! Turns a Junocash `getblocktemplate` response (a Bitcoin-style template
//! extended with RandomX seed fields) into a [`Template`]: the header base the
//! hashing engine works on, the expanded target, and the raw transactions a
//! submission needs.

use std::str::FromStr;

use log::{debug, trace, warn};
use serde_json::Value;

use crate::difficulty::{compact_to_target, is_zero_target, target_to_hex};
use crate::encoding::{decode_permissive, parse_compact_bits, reverse_bytes, to_display_hex};
use crate::error::ParseError;
use crate::fields::{get_nested_str, get_non_empty_str, get_object, get_str, get_u32, get_u64};
use crate::header::{HeaderBase, HeaderFields};

const LOG_TARGET: &str = "template";

pub const VERSION: &str = "version";
pub const PREVIOUS_BLOCK_HASH: &str = "previousblockhash";
pub const CURTIME: &str = "curtime";
pub const HEIGHT: &str = "height";
pub const BITS: &str = "bits";
pub const SEED_HEIGHT: &str = "randomxseedheight";
pub const SEED_HASH: &str = "randomxseedhash";
pub const NEXT_SEED_HASH: &str = "randomxnextseedhash";
pub const DEFAULT_ROOTS: &str = "defaultroots";
pub const MERKLE_ROOT: &str = "merkleroot";
pub const BLOCK_COMMITMENTS_HASH: &str = "blockcommitmentshash";
pub const COINBASE_TXN: &str = "coinbasetxn";
pub const TRANSACTIONS: &str = "transactions";
pub const DATA: &str = "data";

/// A decoded block template ready for mining.
#[derive(Debug, Clone)]
pub struct Template {
    /// Block version.
    pub version: u32,
    /// Hash of the previous block (header byte order).
    pub previous_block_hash: [u8; 32],
    /// Merkle root (header byte order).
    pub merkle_root: [u8; 32],
    /// Block commitments hash (header byte order).
    pub block_commitments_hash: [u8; 32],
    /// Block timestamp (Unix time).
    pub time: u32,
    /// Difficulty target in compact "bits" format.
    pub bits: u32,
    /// Target expanded from `bits` (big-endian).
    pub target: [u8; 32],
    /// Height of the block being mined.
    pub height: u32,
    /// Height the current RandomX seed was taken at.
    pub seed_height: u64,
    /// Current RandomX seed hash (as transmitted).
    pub seed_hash: [u8; 32],
    /// Upcoming RandomX seed hash; only meaningful if `has_next_seed_hash`.
    pub next_seed_hash: [u8; 32],
    /// Whether the template carried a usable next seed hash.
    pub has_next_seed_hash: bool,
    /// Header preimage plus the nonce slot the hashing engine fills.
    pub header_base: HeaderBase,
    /// Coinbase transaction hex, verbatim.
    pub coinbase_txn_hex: String,
    /// Remaining transaction hex in template order, verbatim.
    pub txn_hex: Vec<String>,
}

impl Template {
    /// Decode a template from its JSON value.
    ///
    /// Either every required field decodes or the whole template is rejected.
    /// Malformed optional fields fall back to zero instead.
    pub fn parse(tpl: &Value) -> Result<Self, ParseError> {
        let result = Self::decode(tpl);

        match &result {
            Ok(template) => debug!(target: LOG_TARGET, "decoded block template {}", template.summary()),
            Err(e) => warn!(target: LOG_TARGET, "rejecting block template: {}", e),
        }

        result
    }

    /// Decode a template from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ParseError> {
        let tpl: Value = serde_json::from_str(text)?;
        Self::parse(&tpl)
    }

    fn decode(tpl: &Value) -> Result<Self, ParseError> {
        if !tpl.is_object() {
            return Err(ParseError::NotAnObject);
        }

        let version = get_u32(tpl, VERSION);
        let time = get_u32(tpl, CURTIME);
        let height = get_u32(tpl, HEIGHT);

        let bits = get_str(tpl, BITS).map(parse_compact_bits).unwrap_or(0);
        if bits == 0 {
            trace!(target: LOG_TARGET, "template bits missing or malformed, target will be zero");
        }

        let seed_height = get_u64(tpl, SEED_HEIGHT);
        let seed_hex = get_str(tpl, SEED_HASH).ok_or(ParseError::MissingField { field: SEED_HASH })?;
        // Seed hashes keep their transmitted byte order
        let seed_hash = decode_hash(SEED_HASH, seed_hex)?;

        let next_seed_hash = match get_str(tpl, NEXT_SEED_HASH).map(|hex| decode_hash(NEXT_SEED_HASH, hex)) {
            Some(Ok(hash)) => Some(hash),
            Some(Err(e)) => {
                debug!(target: LOG_TARGET, "ignoring next seed hash: {}", e);
                None
            }
            None => None,
        };

        let roots = get_object(tpl, DEFAULT_ROOTS);
        let merkle_hex = roots.and_then(|r| get_non_empty_str(r, MERKLE_ROOT));
        let commitments_hex = roots
            .and_then(|r| get_non_empty_str(r, BLOCK_COMMITMENTS_HASH))
            .or_else(|| get_non_empty_str(tpl, BLOCK_COMMITMENTS_HASH));

        let coinbase_txn_hex = get_nested_str(tpl, COINBASE_TXN, DATA)
            .unwrap_or_default()
            .to_owned();

        let txn_hex: Vec<String> = tpl
            .get(TRANSACTIONS)
            .and_then(Value::as_array)
            .map(|txs| {
                txs.iter()
                    .filter_map(|tx| get_non_empty_str(tx, DATA))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let target = compact_to_target(bits);

        let fields = HeaderFields {
            version,
            previous_block_hash: required_header_hash(PREVIOUS_BLOCK_HASH, get_str(tpl, PREVIOUS_BLOCK_HASH))?,
            merkle_root: required_header_hash(MERKLE_ROOT, merkle_hex)?,
            block_commitments_hash: required_header_hash(BLOCK_COMMITMENTS_HASH, commitments_hex)?,
            time,
            bits,
        };
        let header_base = fields.build()?;

        Ok(Template {
            version,
            previous_block_hash: fields.previous_block_hash,
            merkle_root: fields.merkle_root,
            block_commitments_hash: fields.block_commitments_hash,
            time,
            bits,
            target,
            height,
            seed_height,
            seed_hash,
            next_seed_hash: next_seed_hash.unwrap_or([0u8; 32]),
            has_next_seed_hash: next_seed_hash.is_some(),
            header_base,
            coinbase_txn_hex,
            txn_hex,
        })
    }

    /// The next seed hash, if the template carried one.
    pub fn next_seed(&self) -> Option<&[u8; 32]> {
        self.has_next_seed_hash.then_some(&self.next_seed_hash)
    }

    /// Target as big-endian hex.
    pub fn target_hex(&self) -> String {
        target_to_hex(&self.target)
    }

    /// Whether the target is all zero, i.e. the template cannot be mined.
    pub fn has_zero_target(&self) -> bool {
        is_zero_target(&self.target)
    }

    /// Seed hash as hex.
    pub fn seed_hash_hex(&self) -> String {
        hex::encode(self.seed_hash)
    }

    /// Next seed hash as hex, if present.
    pub fn next_seed_hash_hex(&self) -> Option<String> {
        self.next_seed().map(hex::encode)
    }

    /// Previous block hash in display hex.
    pub fn previous_block_hash_hex(&self) -> String {
        to_display_hex(&self.previous_block_hash)
    }

    /// Number of non-coinbase transactions.
    pub fn transaction_count(&self) -> usize {
        self.txn_hex.len()
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "height={} bits={:08x} prev={} txs={} seed_height={}",
            self.height,
            self.bits,
            self.previous_block_hash_hex(),
            self.transaction_count(),
            self.seed_height,
        )
    }
}

impl TryFrom<&Value> for Template {
    type Error = ParseError;

    fn try_from(tpl: &Value) -> Result<Self, Self::Error> {
        Template::parse(tpl)
    }
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::from_json_str(s)
    }
}

/// Decode a 32-byte hash, keeping its transmitted byte order.
fn decode_hash(field: &'static str, hex: &str) -> Result<[u8; 32], ParseError> {
    decode_permissive(hex)
        .try_into()
        .map_err(|bytes: Vec<u8>| ParseError::InvalidHashLength {
            field,
            len: bytes.len(),
        })
}

/// Decode a header hash field and flip it into header byte order.
fn required_header_hash(field: &'static str, hex: Option<&str>) -> Result<[u8; 32], ParseError> {
    let hex = hex
        .filter(|h| !h.is_empty())
        .ok_or(ParseError::MissingField { field })?;
    decode_hash(field, hex).map(|hash| reverse_bytes(&hash))
}
