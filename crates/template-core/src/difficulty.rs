//! Compact "bits" expansion and target comparison.

/// Expand a compact "bits" value into a 32-byte big-endian target.
///
/// The bits format is: [exponent (1 byte)][sign (1 bit)][mantissa (23 bits)].
/// The three mantissa bytes are written so the low byte sits `exponent - 3`
/// bytes above the least significant end. The sign bit is ignored.
///
/// Two bounds differ from Bitcoin's `SetCompact`:
/// - exponents below 3 do not shift the mantissa right; it is placed at the
///   least significant end as-is
/// - exponents above 32 pin the mantissa to the three most significant bytes
///
/// Both match the pool software this header format comes from and must stay
/// bit-for-bit identical.
pub fn compact_to_target(bits: u32) -> [u8; 32] {
    let mut target = [0u8; 32];

    let exponent = (bits >> 24) as i32;
    let mantissa = bits & 0x007f_ffff;

    let mut offset = (exponent - 3).max(0);
    if offset + 3 > 32 {
        offset = 29;
    }

    let mantissa_bytes = [(mantissa >> 16) as u8, (mantissa >> 8) as u8, mantissa as u8];
    for (i, byte) in mantissa_bytes.iter().enumerate() {
        let pos = 32 - (offset + (3 - i as i32));
        if (0..32).contains(&pos) {
            target[pos as usize] = *byte;
        }
    }

    target
}

/// Hex rendering of a big-endian target.
pub fn target_to_hex(target: &[u8; 32]) -> String {
    hex::encode(target)
}

/// An all-zero target can never be met and marks a degenerate template.
#[inline]
pub fn is_zero_target(target: &[u8; 32]) -> bool {
    target.iter().all(|&b| b == 0)
}

/// Check whether a hash satisfies a target.
///
/// Both are 256-bit big-endian numbers; the hash passes when it is less than
/// or equal to the target.
#[inline]
pub fn hash_meets_target(hash: &[u8; 32], target: &[u8; 32]) -> bool {
    hash[..] <= target[..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_only(target: &[u8; 32], expected: &[(usize, u8)]) {
        for (i, byte) in target.iter().enumerate() {
            let want = expected
                .iter()
                .find(|(pos, _)| *pos == i)
                .map(|(_, b)| *b)
                .unwrap_or(0);
            assert_eq!(*byte, want, "byte {} mismatch", i);
        }
    }

    #[test]
    fn test_compact_to_target_genesis_style() {
        // Exponent 0x1d = 29, offset 26: mantissa lands at 32 - 29, 32 - 28, 32 - 27
        let target = compact_to_target(0x1d00ffff);
        assert_only(&target, &[(3, 0x00), (4, 0xff), (5, 0xff)]);

        assert_eq!(
            target_to_hex(&target),
            "00000000ffff0000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_compact_to_target_zero() {
        let target = compact_to_target(0);
        assert_eq!(target, [0u8; 32]);
        assert!(is_zero_target(&target));
    }

    #[test]
    fn test_compact_to_target_medium_difficulty() {
        // Exponent 0x1b = 27, offset 24
        let target = compact_to_target(0x1b0404cb);
        assert_only(&target, &[(5, 0x04), (6, 0x04), (7, 0xcb)]);
    }

    #[test]
    fn test_compact_to_target_regtest_limit() {
        // Exponent 0x20 = 32 fills the top three bytes without clamping
        let target = compact_to_target(0x207fffff);
        assert_only(&target, &[(0, 0x7f), (1, 0xff), (2, 0xff)]);
    }

    #[test]
    fn test_compact_to_target_clamps_large_exponent() {
        // offset 30 and above pins the mantissa to the top three bytes
        assert_eq!(compact_to_target(0x21123456), compact_to_target(0x20123456));
        assert_only(&compact_to_target(0xff123456), &[(0, 0x12), (1, 0x34), (2, 0x56)]);
    }

    #[test]
    fn test_compact_to_target_small_exponent_not_shifted() {
        // Exponents 0..=3 all use offset 0: mantissa at the least significant end
        for exponent in 0u32..=3 {
            let target = compact_to_target((exponent << 24) | 0x123456);
            assert_only(&target, &[(29, 0x12), (30, 0x34), (31, 0x56)]);
        }
    }

    #[test]
    fn test_compact_to_target_ignores_sign_bit() {
        assert_eq!(compact_to_target(0x1d80ffff), compact_to_target(0x1d00ffff));
        assert_only(&compact_to_target(0x1dffffff), &[(3, 0x7f), (4, 0xff), (5, 0xff)]);
    }

    #[test]
    fn test_hash_meets_target() {
        let target = compact_to_target(0x1d00ffff);

        let mut good_hash = [0u8; 32];
        good_hash[4] = 0x12;
        good_hash[5] = 0x34;
        assert!(hash_meets_target(&good_hash, &target));

        // Equal is accepted
        assert!(hash_meets_target(&target, &target));

        let mut bad_hash = [0u8; 32];
        bad_hash[3] = 0x01;
        assert!(!hash_meets_target(&bad_hash, &target));
    }

    #[test]
    fn test_zero_target_is_infeasible() {
        let target = compact_to_target(0);
        let mut hash = [0u8; 32];
        hash[31] = 1;
        assert!(!hash_meets_target(&hash, &target));
    }
}
