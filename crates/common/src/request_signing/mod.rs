//! Request signing utilities for network participants.
//!
//! This module provides BLAKE2b-512 body digests, the signing string, Ed25519
//! signing and verification, the `Signature` header codec and signed registry
//! lookups.

pub mod digest;
pub mod header;
pub mod keys;
pub mod registry;
pub mod signing;
pub mod signing_string;

pub use digest::*;
pub use header::*;
pub use keys::*;
pub use registry::*;
pub use signing::*;
pub use signing_string::*;
