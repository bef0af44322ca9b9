//! Role-aware signing and verification of protocol requests.
//!
//! [`RequestAuthenticator`] owns the identity table and ties the digest,
//! signing string, Ed25519 and header pieces together for a participant role.

use error_stack::{Report, ResultExt};
use serde::Serialize;

use crate::error::AuthError;
use crate::identity::{Identity, IdentityTable, Role};
use crate::request_signing::signing_string::format_signing_string;
use crate::request_signing::{
    build_header, compute_digest, format_registry_request, header_window, parse_header, sign,
    sign_registry, verify_header, AuthorizationHeader, RegistryLookup, RegistryRequest,
    ValidityWindow,
};

/// Role that signs registry lookups.
pub const REGISTRY_SENDER_ROLE: Role = Role::BuyerApp;

pub struct RequestAuthenticator {
    identities: IdentityTable,
}

impl RequestAuthenticator {
    #[must_use]
    pub fn new(identities: IdentityTable) -> Self {
        Self { identities }
    }

    #[must_use]
    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    /// Signs `body` as `role` and returns the `Signature ...` header.
    ///
    /// Missing `created`/`expires` default to now and now plus one hour.
    ///
    /// # Errors
    ///
    /// Returns an error if the role has no identity, the body cannot be
    /// serialized or the role's private key is unusable.
    pub fn create_authorisation_header<T: Serialize + ?Sized>(
        &self,
        body: &T,
        role: Role,
        created: Option<i64>,
        expires: Option<i64>,
    ) -> Result<String, Report<AuthError>> {
        let identity = self.identities.resolve(role)?;
        let window = ValidityWindow::with_defaults(created, expires);

        let digest = compute_digest(body)?;
        let signing_string = format_signing_string(&digest, &window);
        let private_key = identity
            .private_key_bytes()
            .attach(format!("role: {}", role))?;
        let signature = sign(signing_string.as_bytes(), &private_key)
            .attach(format!("role: {}", role))?;

        log::info!(
            "Created authorization header for {} ({}), created={} expires={}",
            identity.subscriber_id,
            role,
            window.created,
            window.expires
        );

        Ok(build_header(identity, &window, &signature))
    }

    /// Verifies `header` over `body` against the public key of `role`.
    ///
    /// With `Some(window)` the signature must cover exactly that window. With
    /// `None` the header's own `created`/`expires` values are used. Any
    /// failure, including an unknown role or a broken key, returns `false`.
    #[must_use]
    pub fn verify_authorisation_header<T: Serialize + ?Sized>(
        &self,
        header: &str,
        body: &T,
        role: Role,
        window: Option<ValidityWindow>,
    ) -> bool {
        let public_key = match self
            .identities
            .resolve(role)
            .and_then(Identity::public_key_bytes)
        {
            Ok(key) => key,
            Err(e) => {
                log::debug!("Cannot verify as {}: {:?}", role, e);
                return false;
            }
        };

        if let Some(parsed) = AuthorizationHeader::parse(header) {
            log::debug!(
                "Verifying header from {} (key {}) as {}",
                parsed.subscriber_id,
                parsed.unique_key_id,
                role
            );
        }

        let from_header = || parse_header(header).as_ref().and_then(header_window);
        let window = match window.or_else(from_header) {
            Some(window) => window,
            None => {
                log::debug!("No validity window supplied and none readable from header");
                return false;
            }
        };

        let valid = verify_header(header, body, &window, &public_key);
        log::debug!("Authorization header verification as {}: {}", role, valid);
        valid
    }

    /// Signs a registry lookup with the buyer-app key.
    ///
    /// # Errors
    ///
    /// Returns an error if the buyer-app identity or its key is unusable.
    pub fn sign_registry_request(&self, fields: &RegistryLookup) -> Result<String, Report<AuthError>> {
        let identity = self.identities.resolve(REGISTRY_SENDER_ROLE)?;
        let private_key = identity.private_key_bytes()?;
        sign_registry(fields, &private_key)
    }

    /// Builds a signed gateway lookup sent as the buyer app.
    ///
    /// # Errors
    ///
    /// Returns an error if the buyer-app identity or its key is unusable.
    pub fn format_registry_request(
        &self,
        fields: &RegistryLookup,
    ) -> Result<RegistryRequest, Report<AuthError>> {
        let identity = self.identities.resolve(REGISTRY_SENDER_ROLE)?;
        format_registry_request(fields, identity)
    }
}
