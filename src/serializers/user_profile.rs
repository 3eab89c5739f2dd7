//! User profile serializer
//!
//! `password` is a write-only credential: it is hashed exactly once on
//! create and never emitted.

use crate::credentials::CredentialHasher;
use crate::models::UserProfile;
use crate::schema::{builtin, SchemaDescriptor, ValidatedFields};
use crate::store::Store;

use super::{log_created, log_storage_failure, ModelSerializer, RequestContext, Serializer, SerializerResult};

pub struct UserProfileSerializer<'a> {
    schema: SchemaDescriptor,
    store: &'a dyn Store<UserProfile>,
    hasher: &'a dyn CredentialHasher,
}

impl<'a> UserProfileSerializer<'a> {
    pub fn new(store: &'a dyn Store<UserProfile>, hasher: &'a dyn CredentialHasher) -> Self {
        Self {
            schema: builtin::user_profile(),
            store,
            hasher,
        }
    }
}

impl Serializer for UserProfileSerializer<'_> {
    fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }
}

impl ModelSerializer for UserProfileSerializer<'_> {
    type Model = UserProfile;

    fn create(&self, validated: ValidatedFields, _context: &RequestContext) -> SerializerResult<UserProfile> {
        let mut user = UserProfile::new(validated.require_str("email")?, validated.require_str("name")?);

        if let Some(credential) = self.schema.credential_field() {
            let plaintext = validated.require_str(&credential.name)?;
            user.set_password(self.hasher, plaintext)?;
        }

        let user = self.store.save(user).map_err(|err| {
            log_storage_failure(&self.schema, &err);
            err
        })?;

        log_created(&self.schema, &user);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Argon2Hasher, CredentialError, CredentialResult, HasherConfig};
    use crate::models::RecordId;
    use crate::serializers::SerializerError;
    use crate::store::{MemoryStore, StorageError, StorageResult};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(&HasherConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    struct CountingHasher {
        inner: Argon2Hasher,
        calls: AtomicUsize,
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, plaintext: &str) -> CredentialResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.hash(plaintext)
        }

        fn verify(&self, plaintext: &str, digest: &str) -> CredentialResult<bool> {
            self.inner.verify(plaintext, digest)
        }
    }

    struct FailingHasher;

    impl CredentialHasher for FailingHasher {
        fn hash(&self, _plaintext: &str) -> CredentialResult<String> {
            Err(CredentialError::HashingFailed)
        }

        fn verify(&self, _plaintext: &str, _digest: &str) -> CredentialResult<bool> {
            Err(CredentialError::HashingFailed)
        }
    }

    struct ReadOnlyStore;

    impl Store<UserProfile> for ReadOnlyStore {
        fn save(&self, _record: UserProfile) -> StorageResult<UserProfile> {
            Err(StorageError::Backend("read-only replica".into()))
        }

        fn fetch(&self, id: RecordId) -> StorageResult<UserProfile> {
            Err(StorageError::NotFound(id))
        }
    }

    #[test]
    fn test_create_example() {
        let store: MemoryStore<UserProfile> = MemoryStore::new();
        let hasher = hasher();
        let serializer = UserProfileSerializer::new(&store, &hasher);

        let input = json!({"name": "Al", "email": "a@x.com", "password": "hunter2"});
        let wire = serializer.save(&input, &RequestContext::anonymous()).unwrap();

        assert_eq!(wire, json!({"id": 1, "email": "a@x.com", "name": "Al"}));
        assert!(wire.get("password").is_none());
    }

    #[test]
    fn test_stored_credential_is_hashed() {
        let store: MemoryStore<UserProfile> = MemoryStore::new();
        let hasher = hasher();
        let serializer = UserProfileSerializer::new(&store, &hasher);

        let input = json!({"name": "Al", "email": "a@x.com", "password": "secret123"});
        let validated = serializer.validate(&input).unwrap();
        let user = serializer.create(validated, &RequestContext::anonymous()).unwrap();

        let stored = store.fetch(user.id.unwrap()).unwrap();
        assert_ne!(stored.password, "secret123");
        assert!(stored.check_password(&hasher, "secret123").unwrap());
    }

    #[test]
    fn test_hasher_called_exactly_once() {
        let store: MemoryStore<UserProfile> = MemoryStore::new();
        let hasher = CountingHasher {
            inner: hasher(),
            calls: AtomicUsize::new(0),
        };
        let serializer = UserProfileSerializer::new(&store, &hasher);

        let input = json!({"name": "Al", "email": "a@x.com", "password": "pw"});
        serializer.save(&input, &RequestContext::anonymous()).unwrap();

        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_input_creates_nothing() {
        let store: MemoryStore<UserProfile> = MemoryStore::new();
        let hasher = hasher();
        let serializer = UserProfileSerializer::new(&store, &hasher);

        let input = json!({"name": "Al", "email": "nope", "password": "pw"});
        let err = serializer.save(&input, &RequestContext::anonymous()).unwrap_err();

        match err {
            SerializerError::Validation(e) => assert_eq!(e.fields(), vec!["email"]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_client_supplied_id_ignored() {
        let store: MemoryStore<UserProfile> = MemoryStore::new();
        let hasher = hasher();
        let serializer = UserProfileSerializer::new(&store, &hasher);

        let input = json!({"id": 77, "name": "Al", "email": "a@x.com", "password": "pw"});
        let wire = serializer.save(&input, &RequestContext::anonymous()).unwrap();
        assert_eq!(wire["id"], 1);
    }

    #[test]
    fn test_hashing_failure_propagates() {
        let store: MemoryStore<UserProfile> = MemoryStore::new();
        let serializer = UserProfileSerializer::new(&store, &FailingHasher);

        let input = json!({"name": "Al", "email": "a@x.com", "password": "pw"});
        let err = serializer.save(&input, &RequestContext::anonymous()).unwrap_err();

        assert_eq!(err, SerializerError::Credential(CredentialError::HashingFailed));
        assert!(store.is_empty());
    }

    #[test]
    fn test_storage_error_propagates_unchanged() {
        let hasher = hasher();
        let serializer = UserProfileSerializer::new(&ReadOnlyStore, &hasher);

        let input = json!({"name": "Al", "email": "a@x.com", "password": "pw"});
        let err = serializer.save(&input, &RequestContext::anonymous()).unwrap_err();

        assert_eq!(
            err,
            SerializerError::Storage(StorageError::Backend("read-only replica".into()))
        );
    }
}
