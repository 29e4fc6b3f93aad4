//! Serializable views of a decoded template for JS.

use serde::{Deserialize, Serialize};
use template_core::Template;
use wasm_bindgen::prelude::*;

/// Block template information for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    /// Block height.
    pub height: u32,
    /// Block version.
    pub version: u32,
    /// Block timestamp.
    pub time: u32,
    /// Compact bits as 8 hex digits.
    pub bits: String,
    /// Expanded target (big-endian hex).
    pub target: String,
    /// Whether the target is all zero and cannot be met.
    pub zero_target: bool,
    /// Previous block hash (display format).
    pub prev_hash: String,
    /// Height of the current RandomX seed.
    pub seed_height: u64,
    /// Current RandomX seed hash.
    pub seed_hash: String,
    /// Upcoming RandomX seed hash, if announced.
    pub next_seed_hash: Option<String>,
    /// Number of non-coinbase transactions.
    pub transaction_count: usize,
}

impl From<&Template> for TemplateInfo {
    fn from(template: &Template) -> Self {
        TemplateInfo {
            height: template.height,
            version: template.version,
            time: template.time,
            bits: format!("{:08x}", template.bits),
            target: template.target_hex(),
            zero_target: template.has_zero_target(),
            prev_hash: template.previous_block_hash_hex(),
            seed_height: template.seed_height,
            seed_hash: template.seed_hash_hex(),
            next_seed_hash: template.next_seed_hash_hex(),
            transaction_count: template.transaction_count(),
        }
    }
}

impl TemplateInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}
