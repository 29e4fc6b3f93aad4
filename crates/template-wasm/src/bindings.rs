//! JS-facing wrapper around a decoded block template.

use template_core::{Template, HEADER_BASE_SIZE, NONCE_SIZE};
use wasm_bindgen::prelude::*;

use crate::state::TemplateInfo;

/// A decoded block template held on the WASM side.
#[wasm_bindgen]
pub struct JunoTemplate {
    inner: Template,
}

#[wasm_bindgen]
impl JunoTemplate {
    /// Decode a template from the JSON text of a `getblocktemplate` result.
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> Result<JunoTemplate, JsValue> {
        let inner = Template::from_json_str(json).map_err(reject)?;
        Ok(JunoTemplate::accept(inner))
    }

    /// Decode a template from an already-parsed JS object.
    #[wasm_bindgen(js_name = fromObject)]
    pub fn from_object(value: JsValue) -> Result<JunoTemplate, JsValue> {
        let tpl: serde_json::Value = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid template object: {:?}", e)))?;
        let inner = Template::parse(&tpl).map_err(reject)?;
        Ok(JunoTemplate::accept(inner))
    }

    /// Block height.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Block version.
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u32 {
        self.inner.version
    }

    /// Block timestamp.
    #[wasm_bindgen(getter)]
    pub fn time(&self) -> u32 {
        self.inner.time
    }

    /// Compact difficulty bits.
    #[wasm_bindgen(getter)]
    pub fn bits(&self) -> u32 {
        self.inner.bits
    }

    /// Expanded target as big-endian hex.
    #[wasm_bindgen(getter)]
    pub fn target(&self) -> String {
        self.inner.target_hex()
    }

    /// Height of the current RandomX seed.
    #[wasm_bindgen(getter = seedHeight)]
    pub fn seed_height(&self) -> u64 {
        self.inner.seed_height
    }

    /// Current RandomX seed hash.
    #[wasm_bindgen(getter = seedHash)]
    pub fn seed_hash(&self) -> String {
        self.inner.seed_hash_hex()
    }

    /// Upcoming RandomX seed hash, or `undefined`.
    #[wasm_bindgen(getter = nextSeedHash)]
    pub fn next_seed_hash(&self) -> Option<String> {
        self.inner.next_seed_hash_hex()
    }

    /// The full 140-byte header base.
    #[wasm_bindgen(js_name = headerBase)]
    pub fn header_base(&self) -> Vec<u8> {
        self.inner.header_base.as_bytes().to_vec()
    }

    /// The 108-byte preimage in front of the nonce.
    pub fn preimage(&self) -> Vec<u8> {
        self.inner.header_base.preimage().to_vec()
    }

    /// Write a 32-byte nonce into the header.
    #[wasm_bindgen(js_name = setNonce)]
    pub fn set_nonce(&mut self, nonce: &[u8]) -> Result<(), JsValue> {
        let nonce = nonce_from_slice(nonce).map_err(|e| JsValue::from_str(&e))?;
        self.inner.header_base.set_nonce(&nonce);
        Ok(())
    }

    /// Hex of the header as it currently stands, nonce included.
    #[wasm_bindgen(js_name = headerHex)]
    pub fn header_hex(&self) -> String {
        self.inner.header_base.to_hex()
    }

    /// Hex of the header with `nonce` in place, leaving this template untouched.
    #[wasm_bindgen(js_name = solvedHeaderHex)]
    pub fn solved_header_hex(&self, nonce: &[u8]) -> Result<String, JsValue> {
        let nonce = nonce_from_slice(nonce).map_err(|e| JsValue::from_str(&e))?;
        let header: [u8; HEADER_BASE_SIZE] = self.inner.header_base.with_nonce(&nonce);
        Ok(hex::encode(header))
    }

    /// Coinbase transaction hex.
    #[wasm_bindgen(getter = coinbaseTxnHex)]
    pub fn coinbase_txn_hex(&self) -> String {
        self.inner.coinbase_txn_hex.clone()
    }

    /// Remaining transaction hex, in template order.
    #[wasm_bindgen(js_name = txnHex)]
    pub fn txn_hex(&self) -> js_sys::Array {
        self.inner
            .txn_hex
            .iter()
            .map(|hex| JsValue::from_str(hex))
            .collect()
    }

    /// Summary of the template as a plain JS object.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        TemplateInfo::from(&self.inner).to_js()
    }
}

impl JunoTemplate {
    fn accept(inner: Template) -> Self {
        if inner.has_zero_target() {
            console_log("Template target is zero; no hash can meet it");
        }
        console_log(&format!("Decoded template: {}", inner.summary()));
        JunoTemplate { inner }
    }

    /// The decoded template.
    pub fn template(&self) -> &Template {
        &self.inner
    }
}

fn reject(e: template_core::ParseError) -> JsValue {
    let message = format!("Invalid template: {}", e);
    console_log(&message);
    JsValue::from_str(&message)
}

fn nonce_from_slice(nonce: &[u8]) -> Result<[u8; NONCE_SIZE], String> {
    nonce
        .try_into()
        .map_err(|_| format!("Nonce must be {} bytes, got {}", NONCE_SIZE, nonce.len()))
}

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_from_slice() {
        let nonce = nonce_from_slice(&[7u8; NONCE_SIZE]).unwrap();
        assert_eq!(nonce, [7u8; NONCE_SIZE]);
    }

    #[test]
    fn test_nonce_from_slice_wrong_length() {
        let err = nonce_from_slice(&[0u8; 4]).unwrap_err();
        assert_eq!(err, "Nonce must be 32 bytes, got 4");
        assert!(nonce_from_slice(&[0u8; 33]).is_err());
    }
}
