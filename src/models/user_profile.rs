//! # User Profile

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::credentials::{CredentialHasher, CredentialResult};

use super::{Model, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<RecordId>,

    pub email: String,

    pub name: String,

    /// Argon2id digest, empty until a password is set (never plaintext)
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl UserProfile {
    /// New unsaved profile without a usable password
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: name.into(),
            password: String::new(),
        }
    }

    /// Replace the stored digest with a hash of `plaintext`
    pub fn set_password(&mut self, hasher: &dyn CredentialHasher, plaintext: &str) -> CredentialResult<()> {
        self.password = hasher.hash(plaintext)?;
        Ok(())
    }

    /// Check `plaintext` against the stored digest
    pub fn check_password(&self, hasher: &dyn CredentialHasher, plaintext: &str) -> CredentialResult<bool> {
        if !self.has_usable_password() {
            return Ok(false);
        }
        hasher.verify(plaintext, &self.password)
    }

    pub fn has_usable_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl Model for UserProfile {
    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(id) = self.id {
            fields.insert("id".into(), Value::from(id));
        }
        fields.insert("email".into(), Value::String(self.email.clone()));
        fields.insert("name".into(), Value::String(self.name.clone()));
        fields.insert("password".into(), Value::String(self.password.clone()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Argon2Hasher, HasherConfig};

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(&HasherConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_new_profile_has_no_usable_password() {
        let profile = UserProfile::new("a@x.com", "Al");
        assert!(!profile.has_usable_password());
        assert!(!profile.check_password(&hasher(), "").unwrap());
    }

    #[test]
    fn test_set_and_check_password() {
        let hasher = hasher();
        let mut profile = UserProfile::new("a@x.com", "Al");
        profile.set_password(&hasher, "secret123").unwrap();

        assert_ne!(profile.password, "secret123");
        assert!(profile.check_password(&hasher, "secret123").unwrap());
        assert!(!profile.check_password(&hasher, "secret124").unwrap());
    }

    #[test]
    fn test_serde_omits_password() {
        let hasher = hasher();
        let mut profile = UserProfile::new("a@x.com", "Al");
        profile.set_password(&hasher, "secret123").unwrap();

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains(&profile.password));
    }

    #[test]
    fn test_storage_fields_unsaved() {
        let fields = UserProfile::new("a@x.com", "Al").to_fields();
        assert!(!fields.contains_key("id"));
        assert_eq!(fields["email"], "a@x.com");
    }
}
