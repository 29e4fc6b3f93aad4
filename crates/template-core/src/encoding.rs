//! Hex decoding with the leniency pool software expects.
//!
//! Template producers are trusted to send well-formed hex, and the header they
//! expect us to hash is defined by a permissive decoder: a non-hex character
//! counts as zero and a dangling odd character is ignored. `hex::decode` would
//! reject those inputs, so decoding is done by hand while encoding goes through
//! the `hex` crate.

/// Value of a single ASCII hex digit. Anything else reads as zero.
#[inline]
fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// Decode hex two characters at a time.
///
/// Never fails: invalid digits decode as 0 and a trailing odd character is
/// dropped, so callers must check the resulting length themselves.
pub fn decode_permissive(hex: &str) -> Vec<u8> {
    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect()
}

/// Parse the compact "bits" string of a template.
///
/// Accepts an optional `0x`/`0X` prefix and reads hex digits up to the first
/// non-hex character. Empty or malformed input yields 0. Values wider than
/// 64 bits saturate, and the result keeps the low 32 bits.
pub fn parse_compact_bits(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mut value: u64 = 0;
    for c in digits.chars() {
        let digit = match c.to_digit(16) {
            Some(d) => u64::from(d),
            None => break,
        };
        value = match value.checked_mul(16).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return u32::MAX,
        };
    }

    value as u32
}

/// Reverse the byte order of a 32-byte hash.
///
/// Hashes travel as display hex (most significant byte first) but are laid
/// out least significant byte first inside the header.
#[inline]
pub fn reverse_bytes(bytes: &[u8; 32]) -> [u8; 32] {
    let mut reversed = *bytes;
    reversed.reverse();
    reversed
}

/// Render a header-order hash back into its display hex form.
pub fn to_display_hex(hash: &[u8; 32]) -> String {
    hex::encode(reverse_bytes(hash))
}
