//! Signed registry lookup requests.
//!
//! Registry lookups are not signed with the header scheme. The present search
//! fields are joined with `|` in a fixed order and the raw string is signed.

use chrono::{SecondsFormat, Utc};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::identity::Identity;

use super::signing::sign;

/// Lookup type stamped onto every formatted registry request.
pub const GATEWAY_LOOKUP_TYPE: &str = "gateway";

/// Search parameters of a registry lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub lookup_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
}

impl RegistryLookup {
    /// The `country|domain|type|city|subscriber_id` string, skipping absent
    /// and empty fields.
    #[must_use]
    pub fn signing_payload(&self) -> String {
        [
            &self.country,
            &self.domain,
            &self.lookup_type,
            &self.city,
            &self.subscriber_id,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join("|")
    }
}

/// A lookup ready to be posted to the registry.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryRequest {
    pub sender_subscriber_id: String,
    pub request_id: String,
    pub timestamp: String,
    pub search_parameters: RegistryLookup,
    pub signature: String,
}

/// Signs the joined lookup fields with a 64-byte secret key.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKey`] if `private_key` is not a valid secret key.
pub fn sign_registry(fields: &RegistryLookup, private_key: &[u8]) -> Result<String, Report<AuthError>> {
    sign(fields.signing_payload().as_bytes(), private_key)
}

/// Stamps the gateway lookup type, signs the lookup as `sender` and wraps it
/// with a fresh request id and timestamp.
///
/// # Errors
///
/// Returns [`AuthError::InvalidKey`] if the sender's private key is unusable.
pub fn format_registry_request(
    fields: &RegistryLookup,
    sender: &Identity,
) -> Result<RegistryRequest, Report<AuthError>> {
    let search_parameters = RegistryLookup {
        lookup_type: Some(GATEWAY_LOOKUP_TYPE.to_string()),
        ..fields.clone()
    };

    let private_key = sender.private_key_bytes()?;
    let signature = sign_registry(&search_parameters, &private_key)
        .attach(format!("while signing registry lookup for {}", sender.subscriber_id))?;

    let request = RegistryRequest {
        sender_subscriber_id: sender.subscriber_id.clone(),
        request_id: Uuid::new_v4().to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        search_parameters,
        signature,
    };

    log::info!(
        "Formatted registry lookup {} for {}",
        request.request_id,
        request.sender_subscriber_id
    );

    Ok(request)
}
