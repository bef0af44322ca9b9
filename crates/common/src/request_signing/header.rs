//! The `Signature ...` authorization header.
//!
//! Wire format:
//!
//! ```text
//! Signature keyId="ID|KEYID|ed25519",algorithm="ed25519",created="INT",expires="INT",headers="(created) (expires) digest",signature="BASE64"
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::identity::Identity;

use super::digest::compute_digest;
use super::signing::verify;
use super::signing_string::{format_signing_string, ValidityWindow};

pub const SIGNATURE_SCHEME_PREFIX: &str = "Signature ";
pub const SIGNATURE_ALGORITHM: &str = "ed25519";
pub const SIGNED_HEADERS: &str = "(created) (expires) digest";

/// Parses a comma separated list of `key="value"` pairs.
///
/// Commas inside double quotes do not split. Each segment is split on its
/// first `=`, both sides are trimmed and double quotes are removed from the
/// value. Later duplicates overwrite earlier ones. Empty segments are skipped
/// and a segment without `=` maps to an empty value.
#[must_use]
pub fn parse_filter_string(filter: &str) -> HashMap<String, String> {
    split_top_level(filter)
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (key.trim().to_string(), value.trim().replace('"', ""))
        })
        .collect()
}

fn split_top_level(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                segments.push(&input[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&input[start..]);
    segments
}

/// Formats the authorization header for `identity`.
///
/// Identity fields are inserted verbatim; a `"` inside them corrupts the header.
#[must_use]
pub fn build_header(identity: &Identity, window: &ValidityWindow, signature: &str) -> String {
    format!(
        r#"{prefix}keyId="{subscriber}|{key_id}|{alg}",algorithm="{alg}",created="{created}",expires="{expires}",headers="{headers}",signature="{signature}""#,
        prefix = SIGNATURE_SCHEME_PREFIX,
        subscriber = identity.subscriber_id,
        key_id = identity.unique_key_id,
        alg = SIGNATURE_ALGORITHM,
        created = window.created,
        expires = window.expires,
        headers = SIGNED_HEADERS,
        signature = signature,
    )
}

/// Strips the `Signature ` prefix and parses the remaining pairs.
///
/// Returns `None` when the prefix is missing.
#[must_use]
pub fn parse_header(header: &str) -> Option<HashMap<String, String>> {
    header
        .strip_prefix(SIGNATURE_SCHEME_PREFIX)
        .map(parse_filter_string)
}

/// Reads the `created`/`expires` pair carried by a parsed header.
///
/// Returns `None` unless both are present and integers.
#[must_use]
pub fn header_window(parts: &HashMap<String, String>) -> Option<ValidityWindow> {
    let created = parts.get("created")?.parse::<i64>().ok()?;
    let expires = parts.get("expires")?.parse::<i64>().ok()?;
    Some(ValidityWindow { created, expires })
}

/// Verifies `header` against `body` using the caller-supplied validity window.
///
/// The header's own `created`/`expires` fields are ignored here; the caller
/// decides which window it expects. Every failure, including a missing
/// prefix, a missing `signature` field or an unserializable body, is `false`.
#[must_use]
pub fn verify_header<T: Serialize + ?Sized>(
    header: &str,
    body: &T,
    window: &ValidityWindow,
    public_key: &[u8],
) -> bool {
    let Some(parts) = parse_header(header) else {
        log::debug!("Authorization header does not start with '{}'", SIGNATURE_SCHEME_PREFIX);
        return false;
    };

    let Some(signature) = parts.get("signature") else {
        log::debug!("Authorization header has no signature field");
        return false;
    };

    let digest = match compute_digest(body) {
        Ok(digest) => digest,
        Err(e) => {
            log::debug!("Cannot digest request body: {:?}", e);
            return false;
        }
    };

    let signing_string = format_signing_string(&digest, window);
    verify(signing_string.as_bytes(), signature, public_key)
}

/// Parsed view over the fields of an authorization header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationHeader {
    pub subscriber_id: String,
    pub unique_key_id: String,
    pub algorithm: String,
    pub window: Option<ValidityWindow>,
    pub signature: String,
}

impl AuthorizationHeader {
    /// Extracts the structured fields from a header string.
    ///
    /// Returns `None` when the prefix, `keyId` or `signature` is missing. The
    /// window is `None` unless both `created` and `expires` are integers.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let parts = parse_header(header)?;
        let key_id = parts.get("keyId")?;
        let mut key_parts = key_id.splitn(3, '|');
        let subscriber_id = key_parts.next()?.to_string();
        let unique_key_id = key_parts.next().unwrap_or_default().to_string();
        let algorithm = parts
            .get("algorithm")
            .cloned()
            .or_else(|| key_parts.next().map(str::to_string))
            .unwrap_or_default();

        let window = header_window(&parts);

        Some(Self {
            subscriber_id,
            unique_key_id,
            algorithm,
            window,
            signature: parts.get("signature")?.clone(),
        })
    }
}
