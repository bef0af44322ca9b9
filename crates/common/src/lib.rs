//! Request authentication for decentralized commerce network participants.
//!
//! Buyer, seller and logistics apps sign outgoing JSON bodies with Ed25519
//! over a BLAKE2b-512 digest and attach the result as a `Signature` header.
//! Receivers recompute the signing string and check it against the sender's
//! public key.
//!
//! # Modules
//!
//! - [`authenticator`]: Role-aware header creation, verification and registry lookups
//! - [`error`]: Error types and error handling utilities
//! - [`identity`]: Participant roles and their identities
//! - [`logging`]: Logger setup for binaries
//! - [`request_signing`]: Digest, signing string, Ed25519 and header codec
//! - [`settings`]: Configuration loading from TOML and the environment
//! - [`test_support`]: Testing utilities

pub mod authenticator;
pub mod error;
pub mod identity;
pub mod logging;
pub mod request_signing;
pub mod settings;
pub mod test_support;
