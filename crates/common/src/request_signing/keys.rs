//! Ed25519 key material.
//!
//! Private keys travel as 64 bytes (32-byte seed followed by the 32-byte public
//! key) and public keys as 32 bytes, both base64 encoded in configuration.

use base64::{engine::general_purpose, Engine};
use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH};
use error_stack::Report;
use rand::rngs::OsRng;

use crate::error::AuthError;

pub struct Keypair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

impl Keypair {
    #[must_use]
    pub fn generate() -> Self {
        let mut csprng = OsRng;

        let signing_key = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();

        Self {
            signing_key,
            verifying_key,
        }
    }

    /// The 64-byte secret key (seed followed by public key).
    #[must_use]
    pub fn private_key_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        self.signing_key.to_keypair_bytes()
    }

    #[must_use]
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.verifying_key.to_bytes()
    }

    #[must_use]
    pub fn private_key_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.private_key_bytes())
    }

    #[must_use]
    pub fn public_key_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.public_key_bytes())
    }
}

/// Generates a fresh key pair, returning `(private_key, public_key)` bytes.
#[must_use]
pub fn generate_keypair() -> ([u8; KEYPAIR_LENGTH], [u8; PUBLIC_KEY_LENGTH]) {
    let keypair = Keypair::generate();
    (keypair.private_key_bytes(), keypair.public_key_bytes())
}

/// Builds a signing key from 64 secret key bytes.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKey`] if the slice is not 64 bytes long or its
/// public half does not belong to its seed.
pub fn parse_private_key(key_bytes: &[u8]) -> Result<SigningKey, Report<AuthError>> {
    let key_array: [u8; KEYPAIR_LENGTH] = key_bytes.try_into().map_err(|_| {
        Report::new(AuthError::InvalidKey {
            message: format!(
                "Invalid private key length {} (expected {} bytes for Ed25519)",
                key_bytes.len(),
                KEYPAIR_LENGTH
            ),
        })
    })?;

    SigningKey::from_keypair_bytes(&key_array).map_err(|e| {
        Report::new(AuthError::InvalidKey {
            message: format!("Private key is not a valid Ed25519 keypair: {}", e),
        })
    })
}

/// Builds a verifying key from 32 public key bytes.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKey`] if the slice is not 32 bytes long or is
/// not a valid curve point.
pub fn parse_public_key(key_bytes: &[u8]) -> Result<VerifyingKey, Report<AuthError>> {
    let key_array: [u8; PUBLIC_KEY_LENGTH] = key_bytes.try_into().map_err(|_| {
        Report::new(AuthError::InvalidKey {
            message: format!(
                "Public key must be {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                key_bytes.len()
            ),
        })
    })?;

    VerifyingKey::from_bytes(&key_array).map_err(|e| {
        Report::new(AuthError::InvalidKey {
            message: format!("Failed to create verifying key: {}", e),
        })
    })
}

/// Decodes a base64 public key into raw bytes.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKey`] if the string is not base64.
pub fn decode_public_key(public_key_b64: &str) -> Result<Vec<u8>, Report<AuthError>> {
    general_purpose::STANDARD
        .decode(public_key_b64.trim())
        .map_err(|e| {
            Report::new(AuthError::InvalidKey {
                message: format!("Failed to decode base64 public key: {}", e),
            })
        })
}
