#[cfg(test)]
pub mod tests {
    use base64::{engine::general_purpose, Engine};
    use ed25519_dalek::SigningKey;

    use crate::identity::{Identity, IdentityTable, Role};

    /// Deterministic identity whose key is derived from a repeated seed byte.
    pub fn test_identity(subscriber_id: &str, unique_key_id: &str, seed: u8) -> Identity {
        let signing_key = SigningKey::from_bytes(&[seed; 32]);

        Identity {
            subscriber_id: subscriber_id.to_string(),
            subscriber_uri: format!("https://{}/ondc", subscriber_id),
            unique_key_id: unique_key_id.to_string(),
            public_key: general_purpose::STANDARD.encode(signing_key.verifying_key().as_bytes()),
            private_key: general_purpose::STANDARD.encode(signing_key.to_keypair_bytes()),
        }
    }

    pub fn create_test_identity_table() -> IdentityTable {
        [
            (Role::BuyerApp, test_identity("bap.example.com", "bap-key-1", 1)),
            (Role::SellerApp, test_identity("bpp.example.com", "bpp-key-1", 2)),
            (
                Role::LogisticsApp,
                test_identity("lsp.example.com", "lsp-key-1", 3),
            ),
        ]
        .into_iter()
        .collect()
    }
}
