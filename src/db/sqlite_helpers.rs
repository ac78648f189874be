//! SQLite helper utilities for type conversion
//!
//! SQLite has no native array type, so string lists (book genres) are stored
//! as JSON text. Timestamps are stored as ISO8601 strings.

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

/// Serialize a Vec to a JSON string for SQLite storage
#[inline]
pub fn vec_to_json<T: Serialize>(v: &[T]) -> String {
    serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a JSON string from SQLite back to a Vec (returns empty vec if invalid)
#[inline]
pub fn json_to_vec<T: DeserializeOwned>(s: &str) -> Vec<T> {
    serde_json::from_str(s).unwrap_or_default()
}

/// Get current timestamp as ISO8601 string
#[inline]
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_json_roundtrip() {
        let v = vec!["fantasy".to_string(), "classic".to_string()];
        let json = vec_to_json(&v);
        let parsed: Vec<String> = json_to_vec(&json);
        assert_eq!(v, parsed);
    }

    #[test]
    fn test_empty_vec() {
        let v: Vec<String> = vec![];
        assert_eq!(vec_to_json(&v), "[]");
        let parsed: Vec<String> = json_to_vec("[]");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_invalid_json_is_empty() {
        let parsed: Vec<String> = json_to_vec("not json");
        assert!(parsed.is_empty());
    }
}
