use dmt_core::errors::DmtError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Lowercase hex SHA-256 over [`to_canonical_json_bytes`] of `value`.
///
/// Two values that serialize to the same JSON tree hash identically
/// regardless of field or map order.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, DmtError> {
    let digest = Sha256::new()
        .chain_update(to_canonical_json_bytes(value)?)
        .finalize();
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
