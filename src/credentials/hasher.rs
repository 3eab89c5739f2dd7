//! # Credential Hashing
//!
//! Credentials are stored only as Argon2id PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), each with a fresh salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use super::errors::{CredentialError, CredentialResult};

/// One-way transform applied to a credential before persistence.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext credential into an opaque digest
    fn hash(&self, plaintext: &str) -> CredentialResult<String>;

    /// Check a plaintext credential against a stored digest
    fn verify(&self, plaintext: &str, digest: &str) -> CredentialResult<bool>;
}

/// Argon2 cost parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Memory cost in KiB (default: 19456)
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Number of passes (default: 2)
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Degree of parallelism (default: 1)
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    Params::DEFAULT_P_COST
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Argon2id hasher
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &HasherConfig) -> CredentialResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| CredentialError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> CredentialResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| CredentialError::HashingFailed)
    }

    /// Uses constant-time comparison internally (via argon2 crate).
    fn verify(&self, plaintext: &str, digest: &str) -> CredentialResult<bool> {
        let parsed = PasswordHash::new(digest).map_err(|_| CredentialError::MalformedDigest)?;

        Ok(self
            .argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::new(&HasherConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let digest = hasher.hash("secret123").unwrap();

        assert_ne!(digest, "secret123");
        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("secret123", &digest).unwrap());
        assert!(!hasher.verify("wrong", &digest).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = cheap_hasher();
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same", &first).unwrap());
        assert!(hasher.verify("same", &second).unwrap());
    }

    #[test]
    fn test_malformed_digest() {
        let hasher = cheap_hasher();
        assert_eq!(
            hasher.verify("secret", "plaintext-not-a-digest"),
            Err(CredentialError::MalformedDigest)
        );
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = HasherConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(Argon2Hasher::new(&config), Err(CredentialError::InvalidParams(_))));
    }

    #[test]
    fn test_default_config_matches_argon2_defaults() {
        let config = HasherConfig::default();
        assert_eq!(config.memory_kib, 19456);
        assert_eq!(config.iterations, 2);
        assert_eq!(config.parallelism, 1);
    }

    #[test]
    fn test_default_hasher_round_trip() {
        let hasher = Argon2Hasher::default();
        let digest = hasher.hash("hunter2").unwrap();
        assert!(hasher.verify("hunter2", &digest).unwrap());
    }
}
