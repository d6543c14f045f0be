//! License vector loader smoke test.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

const VECTORS: &[&str] = &[
    "license_full.json",
    "license_expired.json",
    "license_wrong_types.json",
    "license_bad_date.json",
];

#[test]
fn every_vector_is_a_json_object() {
    for name in VECTORS {
        let s = fs::read_to_string(format!("tests/vectors/{name}"))
            .unwrap_or_else(|e| panic!("read {name}: {e}"));
        let v: serde_json::Value =
            serde_json::from_str(&s).unwrap_or_else(|e| panic!("parse {name}: {e}"));
        assert!(v.is_object(), "{name} must be an object");
        assert!(v.get("expires_at").is_some(), "{name} must carry expires_at");
    }
}
