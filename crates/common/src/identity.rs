//! Participant roles and their signing identities.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::request_signing::keys::decode_public_key;

/// Network participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    BuyerApp,
    SellerApp,
    LogisticsApp,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::BuyerApp, Role::SellerApp, Role::LogisticsApp];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::BuyerApp => "buyer-app",
            Role::SellerApp => "seller-app",
            Role::LogisticsApp => "logistics-app",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Report<AuthError>;

    /// Accepts the canonical names as well as the short `bap`, `bpp` and
    /// `logistic` forms used on the network.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer-app" | "buyer_app" | "bap" => Ok(Role::BuyerApp),
            "seller-app" | "seller_app" | "bpp" => Ok(Role::SellerApp),
            "logistics-app" | "logistics_app" | "logistics" | "logistic" => {
                Ok(Role::LogisticsApp)
            }
            other => Err(Report::new(AuthError::Configuration {
                message: format!("Unknown participant role '{}'", other),
            })),
        }
    }
}

/// Subscriber identity and key material for one role.
///
/// Keys are kept base64 encoded exactly as configured; they are decoded at
/// call time so an empty or broken key only fails the operation that uses it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub subscriber_id: String,
    pub subscriber_uri: String,
    pub unique_key_id: String,
    pub public_key: String,
    #[serde(skip_serializing)]
    pub private_key: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("subscriber_id", &self.subscriber_id)
            .field("subscriber_uri", &self.subscriber_uri)
            .field("unique_key_id", &self.unique_key_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Identity {
    /// Decodes the configured private key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidKey`] if the key is not base64.
    pub fn private_key_bytes(&self) -> Result<Vec<u8>, Report<AuthError>> {
        general_purpose::STANDARD
            .decode(self.private_key.trim())
            .map_err(|e| {
                Report::new(AuthError::InvalidKey {
                    message: format!("Failed to decode base64 private key: {}", e),
                })
            })
            .attach(format!("subscriber: {}", self.subscriber_id))
    }

    /// Decodes the configured public key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidKey`] if the key is not base64.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, Report<AuthError>> {
        decode_public_key(&self.public_key).attach(format!("subscriber: {}", self.subscriber_id))
    }
}

/// Immutable mapping from role to identity, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    identities: HashMap<Role, Identity>,
}

impl IdentityTable {
    #[must_use]
    pub fn new(identities: HashMap<Role, Identity>) -> Self {
        Self { identities }
    }

    /// Looks up the identity for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if no identity is registered.
    pub fn resolve(&self, role: Role) -> Result<&Identity, Report<AuthError>> {
        self.identities.get(&role).ok_or_else(|| {
            Report::new(AuthError::Configuration {
                message: format!("No identity configured for role '{}'", role),
            })
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl FromIterator<(Role, Identity)> for IdentityTable {
    fn from_iter<I: IntoIterator<Item = (Role, Identity)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_aliases() {
        assert_eq!("bap".parse::<Role>().expect("bap"), Role::BuyerApp);
        assert_eq!("bpp".parse::<Role>().expect("bpp"), Role::SellerApp);
        assert_eq!("logistic".parse::<Role>().expect("logistic"), Role::LogisticsApp);
        assert_eq!(
            "Logistics-App".parse::<Role>().expect("canonical"),
            Role::LogisticsApp
        );
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().expect("should parse"), role);
        }
    }

    #[test]
    fn test_unknown_role() {
        let err = "gateway".parse::<Role>().expect_err("gateway is not a role");
        assert!(matches!(err.current_context(), AuthError::Configuration { .. }));
    }

    #[test]
    fn test_resolve_missing_role() {
        let table: IdentityTable = [(Role::BuyerApp, Identity::default())]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 1);
        assert!(table.resolve(Role::BuyerApp).is_ok());
        assert!(table.resolve(Role::SellerApp).is_err());
    }

    #[test]
    fn test_private_key_not_serialized() {
        let identity = Identity {
            subscriber_id: "bap.example.com".into(),
            private_key: "c2VjcmV0".into(),
            ..Identity::default()
        };
        let json = serde_json::to_string(&identity).expect("should serialize identity");
        assert!(!json.contains("c2VjcmV0"));
    }

    #[test]
    fn test_private_key_redacted_in_debug() {
        let identity = Identity {
            subscriber_id: "bap.example.com".into(),
            public_key: "cHVibGlj".into(),
            private_key: "c2VjcmV0".into(),
            ..Identity::default()
        };
        let debug = format!("{:?}", identity);
        assert!(!debug.contains("c2VjcmV0"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("bap.example.com"));
        assert!(debug.contains("cHVibGlj"));
    }

    #[test]
    fn test_invalid_base64_key_fails_at_use() {
        let identity = Identity {
            public_key: "***".into(),
            ..Identity::default()
        };
        assert!(identity.public_key_bytes().is_err());
        // Empty keys decode fine and only fail once used for signing.
        let empty = Identity::default()
            .private_key_bytes()
            .expect("empty string is valid base64");
        assert!(empty.is_empty());
    }
}
