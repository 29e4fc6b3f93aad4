//! Browser tests for the JS-facing template wrapper.

#![cfg(target_arch = "wasm32")]

use template_wasm::JunoTemplate;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TEMPLATE: &str = r#"{
    "version": 4,
    "previousblockhash": "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
    "curtime": 1700000000,
    "height": 100,
    "bits": "1f07ffff",
    "randomxseedheight": 0,
    "randomxseedhash": "5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed5eed",
    "defaultroots": {
        "merkleroot": "a0a1a2a3a4a5a6a7a8a9aaabacadaeafb0b1b2b3b4b5b6b7b8b9babbbcbdbebf",
        "blockcommitmentshash": "1111111111111111111111111111111122222222222222222222222222222222"
    },
    "coinbasetxn": { "data": "0500008001" },
    "transactions": [{ "data": "aa01" }, { "data": "bb02" }]
}"#;

#[wasm_bindgen_test]
fn decodes_template() {
    let template = JunoTemplate::new(TEMPLATE).unwrap();

    assert_eq!(template.height(), 100);
    assert_eq!(template.bits(), 0x1f07ffff);
    assert_eq!(template.header_base().len(), 140);
    assert_eq!(template.preimage().len(), 108);
    assert_eq!(template.txn_hex().length(), 2);
    assert_eq!(template.next_seed_hash(), None);
}

#[wasm_bindgen_test]
fn writes_nonce() {
    let mut template = JunoTemplate::new(TEMPLATE).unwrap();

    assert!(template.set_nonce(&[1u8; 4]).is_err());
    template.set_nonce(&[0xab; 32]).unwrap();

    assert!(template.header_hex().ends_with(&"ab".repeat(32)));
}

#[wasm_bindgen_test]
fn rejects_template_without_seed() {
    let broken = TEMPLATE.replace("randomxseedhash", "seed");
    assert!(JunoTemplate::new(&broken).is_err());
}
