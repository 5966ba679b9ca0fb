//! Hashing - SHA-256 for render reports
//!
//! Output bytes are hashed so callers can detect overwrites of the shared
//! deterministic path. The job hash identifies the request itself.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// SHA-256 of bytes as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// JSON with object keys sorted at every level, no whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v = serde_json::to_value(value)?;
    to_string(&sort_value(v))
}

fn sort_value(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_value(v))).collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_value).collect()),
        other => other,
    }
}

/// job_hash = sha256(format:template:canonical_request:engine_version)
pub fn compute_job_hash(
    format: &str,
    template: &str,
    request: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(request)?;
    Ok(sha256_hex(format!("{format}:{template}:{canonical}:{engine_version}").as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": {"y": 2, "b": 3}});
        assert_eq!(canonical_json(&obj).unwrap(), r#"{"a":{"b":3,"y":2},"z":1}"#);
    }

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_job_hash_ignores_key_order() {
        let a = json!({"price": "1", "address": "x"});
        let b = json!({"address": "x", "price": "1"});
        assert_eq!(
            compute_job_hash("flyer", "modern", &a, "1.0.0").unwrap(),
            compute_job_hash("flyer", "modern", &b, "1.0.0").unwrap()
        );
        assert_ne!(
            compute_job_hash("flyer", "modern", &a, "1.0.0").unwrap(),
            compute_job_hash("flyer", "luxury", &a, "1.0.0").unwrap()
        );
    }
}
