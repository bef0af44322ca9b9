//! Command implementations. Each returns the text to print.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use ondc_auth_common::authenticator::RequestAuthenticator;
use ondc_auth_common::identity::Role;
use ondc_auth_common::request_signing::{Keypair, RegistryLookup, ValidityWindow};

use crate::error::CliError;
use crate::OutputFormat;

pub const SMOKE_CREATED: i64 = 1689620709;
pub const SMOKE_EXPIRES: i64 = 1689624309;

fn read_body(path: &Path) -> Result<Value, CliError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn keygen(format: &OutputFormat) -> Result<String, CliError> {
    let keypair = Keypair::generate();

    match format {
        OutputFormat::Text => Ok(format!(
            "private_key = \"{}\"\npublic_key = \"{}\"",
            keypair.private_key_base64(),
            keypair.public_key_base64()
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "private_key": keypair.private_key_base64(),
            "public_key": keypair.public_key_base64(),
        }))?),
    }
}

pub fn sign(
    authenticator: &RequestAuthenticator,
    role: Role,
    body_path: &Path,
    created: Option<i64>,
    expires: Option<i64>,
) -> Result<String, CliError> {
    let body = read_body(body_path)?;
    Ok(authenticator.create_authorisation_header(&body, role, created, expires)?)
}

/// Prints `true` or `false`; a failed check is not an error.
pub fn verify(
    authenticator: &RequestAuthenticator,
    role: Role,
    header: &str,
    body_path: &Path,
    created: Option<i64>,
    expires: Option<i64>,
) -> Result<String, CliError> {
    let body = read_body(body_path)?;
    let window = if created.is_some() || expires.is_some() {
        Some(ValidityWindow::with_defaults(created, expires))
    } else {
        None
    };

    let valid = authenticator.verify_authorisation_header(header, &body, role, window);
    Ok(valid.to_string())
}

pub fn registry(
    authenticator: &RequestAuthenticator,
    fields: &RegistryLookup,
) -> Result<String, CliError> {
    let request = authenticator.format_registry_request(fields)?;
    Ok(serde_json::to_string_pretty(&request)?)
}

pub fn smoke_request_body() -> Value {
    json!({
        "context": {
            "domain": "nic2004:60212",
            "country": "IND",
            "city": "Kochi",
            "action": "search",
            "core_version": "0.9.1",
            "bap_id": "bap.stayhalo.in",
            "bap_uri": "https://8f9f-49-207-209-131.ngrok.io/protocol/",
            "transaction_id": "e6d9f908-1d26-4ff3-a6d1-3af3d3721054",
            "message_id": "a2fe6d52-9fe4-4d1a-9d0b-dccb8b48522d",
            "timestamp": "2022-01-04T09:17:55.971Z",
            "ttl": "P1M"
        },
        "message": {
            "intent": {
                "fulfillment": {
                    "start": { "location": { "gps": "10.108768, 76.347517" } },
                    "end": { "location": { "gps": "10.102997, 76.353480" } }
                }
            }
        }
    })
}

/// Signs the sample search request as the logistics app and checks it.
pub fn smoke(authenticator: &RequestAuthenticator) -> Result<String, CliError> {
    let body = smoke_request_body();
    let header = authenticator.create_authorisation_header(
        &body,
        Role::LogisticsApp,
        Some(SMOKE_CREATED),
        Some(SMOKE_EXPIRES),
    )?;

    let window = ValidityWindow {
        created: SMOKE_CREATED,
        expires: SMOKE_EXPIRES,
    };
    let valid =
        authenticator.verify_authorisation_header(&header, &body, Role::LogisticsApp, Some(window));
    log::info!("Smoke test verification: {}", valid);

    Ok(format!("{}\n{}", header, valid))
}
