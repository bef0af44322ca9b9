//! Error types for request signing and verification.

use derive_more::{Display, Error};

/// Errors surfaced to callers of the signing side.
///
/// Verification never produces one of these: malformed headers, keys and
/// signatures are reported as a failed check instead.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// Settings could not be loaded or an identity could not be resolved.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// A private or public key failed to decode or has the wrong length.
    #[display("Invalid key: {message}")]
    InvalidKey { message: String },

    /// A request body could not be serialized to JSON.
    #[display("Serialization error: {message}")]
    Serialization { message: String },
}
