//! Detached Ed25519 signing and verification.
//!
//! Signatures are standard base64. Verification tolerates signatures whose
//! trailing `=` padding was stripped in transit.

use base64::{engine::general_purpose, Engine};
use ed25519_dalek::{Signature, Signer as Ed25519Signer, Verifier, SIGNATURE_LENGTH};
use error_stack::Report;

use crate::error::AuthError;

use super::keys::{parse_private_key, parse_public_key};

/// Signs `message` with a 64-byte secret key and returns the base64 signature.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKey`] if `private_key` is not a valid 64-byte
/// Ed25519 secret key.
pub fn sign(message: &[u8], private_key: &[u8]) -> Result<String, Report<AuthError>> {
    let signing_key = parse_private_key(private_key)?;
    Ok(general_purpose::STANDARD.encode(signing_key.sign(message).to_bytes()))
}

/// Checks a base64 detached signature over `message` against a 32-byte public key.
///
/// Returns `true` only when the Ed25519 check succeeds. Undecodable or
/// wrongly sized signatures and keys yield `false`.
#[must_use]
pub fn verify(message: &[u8], signature_b64: &str, public_key: &[u8]) -> bool {
    let verifying_key = match parse_public_key(public_key) {
        Ok(key) => key,
        Err(e) => {
            log::debug!("Rejecting signature, bad public key: {:?}", e);
            return false;
        }
    };

    let signature_bytes = match general_purpose::STANDARD.decode(add_base64_padding(signature_b64)) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("Rejecting signature, invalid base64: {}", e);
            return false;
        }
    };

    let signature_array: [u8; SIGNATURE_LENGTH] = match signature_bytes.try_into() {
        Ok(array) => array,
        Err(bytes) => {
            log::debug!(
                "Rejecting signature, expected {} bytes but got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            );
            return false;
        }
    };

    let signature = Signature::from_bytes(&signature_array);

    match verifying_key.verify(message, &signature) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Signature check failed: {}", e);
            false
        }
    }
}

/// Appends `=` until the length is a multiple of four.
#[must_use]
pub fn add_base64_padding(value: &str) -> String {
    let padding = (4 - value.len() % 4) % 4;
    format!("{}{}", value, "=".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request_signing::keys::Keypair;

    #[test]
    fn test_sign_and_verify() {
        let keypair = Keypair::generate();
        let payload = b"test payload for verification";
        let signature = sign(payload, &keypair.private_key_bytes()).expect("should sign");

        assert!(verify(payload, &signature, &keypair.public_key_bytes()));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let keypair = Keypair::generate();
        let first = sign(b"payload", &keypair.private_key_bytes()).expect("should sign");
        let second = sign(b"payload", &keypair.private_key_bytes()).expect("should sign");
        assert_eq!(first, second);
    }

    #[test]
    fn test_verify_wrong_payload() {
        let keypair = Keypair::generate();
        let signature = sign(b"original payload", &keypair.private_key_bytes()).expect("should sign");

        assert!(
            !verify(b"wrong payload", &signature, &keypair.public_key_bytes()),
            "Signature should not verify with wrong payload"
        );
    }

    #[test]
    fn test_verify_wrong_key() {
        let signer = Keypair::generate();
        let other = Keypair::generate();
        let signature = sign(b"payload", &signer.private_key_bytes()).expect("should sign");

        assert!(!verify(b"payload", &signature, &other.public_key_bytes()));
    }

    #[test]
    fn test_verify_unpadded_signature() {
        let keypair = Keypair::generate();
        let signature = sign(b"payload", &keypair.private_key_bytes()).expect("should sign");
        let unpadded = signature.trim_end_matches('=');
        assert_ne!(unpadded, signature, "64-byte signatures carry padding");

        assert!(verify(b"payload", unpadded, &keypair.public_key_bytes()));
    }

    #[test]
    fn test_verify_malformed_signature() {
        let keypair = Keypair::generate();
        assert!(!verify(b"payload", "not-valid-base64!!!", &keypair.public_key_bytes()));
        assert!(!verify(b"payload", "", &keypair.public_key_bytes()));
        assert!(!verify(b"payload", "AAAA", &keypair.public_key_bytes()));
    }

    #[test]
    fn test_verify_malformed_public_key() {
        let keypair = Keypair::generate();
        let signature = sign(b"payload", &keypair.private_key_bytes()).expect("should sign");

        assert!(!verify(b"payload", &signature, &[]));
        assert!(!verify(b"payload", &signature, &keypair.public_key_bytes()[..16]));
    }

    #[test]
    fn test_sign_rejects_bad_private_key() {
        let err = sign(b"payload", &[0u8; 10]).expect_err("short key must fail");
        assert!(matches!(err.current_context(), AuthError::InvalidKey { .. }));
    }

    #[test]
    fn test_add_base64_padding() {
        assert_eq!(add_base64_padding("abcd"), "abcd");
        assert_eq!(add_base64_padding("abc"), "abc=");
        assert_eq!(add_base64_padding("ab"), "ab==");
        assert_eq!(add_base64_padding(""), "");
    }
}
