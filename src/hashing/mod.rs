//! Canonicalización JSON y huella de configuraciones de step.

pub mod canonical_json;

use serde_json::Value;
use sha2::{Digest, Sha256};

pub use canonical_json::to_canonical_json;

/// SHA-256 (hex) de la forma canónica de `value`.
pub fn config_hash(value: &Value) -> String {
    format!("{:x}", Sha256::digest(to_canonical_json(value).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_ignores_key_order() {
        assert_eq!(config_hash(&json!({"k": 10, "r": 1})), config_hash(&json!({"r": 1, "k": 10})));
        assert_ne!(config_hash(&json!({"k": 10})), config_hash(&json!({"k": 11})));
    }

    #[test]
    fn hash_is_hex_sha256() {
        let h = config_hash(&json!({}));
        assert_eq!(h.len(), 64);
        assert_eq!(h, "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a");
    }
}
