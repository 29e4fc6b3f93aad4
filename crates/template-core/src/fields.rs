//! Lenient accessors over template JSON.
//!
//! Optional fields never fail a parse: a missing key, a value of the wrong
//! type, or an integer that does not fit reads as the default.

use serde_json::Value;

/// Read an unsigned 32-bit integer, or 0.
pub fn get_u32(obj: &Value, key: &str) -> u32 {
    obj.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Read an unsigned 64-bit integer, or 0.
pub fn get_u64(obj: &Value, key: &str) -> u64 {
    obj.get(key).and_then(Value::as_u64).unwrap_or(0)
}

/// Read a string field.
pub fn get_str<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Read a non-empty string field.
pub fn get_non_empty_str<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    get_str(obj, key).filter(|s| !s.is_empty())
}

/// Read a nested object field.
pub fn get_object<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| v.is_object())
}

/// Read `obj[outer][inner]` as a string.
pub fn get_nested_str<'a>(obj: &'a Value, outer: &str, inner: &str) -> Option<&'a str> {
    get_object(obj, outer).and_then(|nested| get_str(nested, inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_u32_defaults() {
        let obj = json!({
            "small": 7,
            "huge": 5_000_000_000u64,
            "negative": -1,
            "text": "12",
            "float": 1.5
        });

        assert_eq!(get_u32(&obj, "small"), 7);
        assert_eq!(get_u32(&obj, "huge"), 0);
        assert_eq!(get_u32(&obj, "negative"), 0);
        assert_eq!(get_u32(&obj, "text"), 0);
        assert_eq!(get_u32(&obj, "float"), 0);
        assert_eq!(get_u32(&obj, "missing"), 0);
    }

    #[test]
    fn test_get_u64() {
        let obj = json!({ "height": 5_000_000_000u64 });
        assert_eq!(get_u64(&obj, "height"), 5_000_000_000);
        assert_eq!(get_u64(&obj, "missing"), 0);
    }

    #[test]
    fn test_get_str_variants() {
        let obj = json!({ "a": "abc", "empty": "", "num": 3 });

        assert_eq!(get_str(&obj, "a"), Some("abc"));
        assert_eq!(get_str(&obj, "empty"), Some(""));
        assert_eq!(get_str(&obj, "num"), None);
        assert_eq!(get_non_empty_str(&obj, "empty"), None);
    }

    #[test]
    fn test_get_nested_str() {
        let obj = json!({
            "coinbasetxn": { "data": "0400008085" },
            "flat": "value"
        });

        assert_eq!(get_nested_str(&obj, "coinbasetxn", "data"), Some("0400008085"));
        assert_eq!(get_nested_str(&obj, "coinbasetxn", "hash"), None);
        assert_eq!(get_nested_str(&obj, "flat", "data"), None);
    }

    #[test]
    fn test_accessors_on_non_object() {
        let arr = json!([1, 2, 3]);
        assert_eq!(get_u32(&arr, "version"), 0);
        assert_eq!(get_str(&arr, "bits"), None);
    }
}
