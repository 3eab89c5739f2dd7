//! # Credentials
//!
//! The hashing collaborator used when a schema marks a field as a
//! credential. Plaintext never leaves the `create` call that receives it.

pub mod errors;
pub mod hasher;

pub use errors::{CredentialError, CredentialResult};
pub use hasher::{Argon2Hasher, CredentialHasher, HasherConfig};
