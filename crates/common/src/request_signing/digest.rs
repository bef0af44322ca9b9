//! BLAKE2b-512 digest of request bodies.
//!
//! The digest covers the exact bytes of the compact JSON serialization, so the
//! sender and receiver must agree on key order. `serde_json` is built with
//! `preserve_order`, which keeps object keys in insertion order.

use base64::{engine::general_purpose, Engine};
use blake2::{Blake2b512, Digest};
use error_stack::Report;
use serde::Serialize;

use crate::error::AuthError;

/// Hashes `message` with keyless BLAKE2b-512 and returns the standard base64
/// encoding of the 64-byte digest.
#[must_use]
pub fn hash_message(message: &[u8]) -> String {
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    general_purpose::STANDARD.encode(hasher.finalize())
}

/// Computes the digest of a request body.
///
/// # Errors
///
/// Returns [`AuthError::Serialization`] if `body` cannot be serialized to JSON.
pub fn compute_digest<T: Serialize + ?Sized>(body: &T) -> Result<String, Report<AuthError>> {
    let bytes = serde_json::to_vec(body).map_err(|e| {
        Report::new(AuthError::Serialization {
            message: format!("Failed to serialize request body: {}", e),
        })
    })?;

    Ok(hash_message(&bytes))
}
