//! # Record Transformer
//!
//! A serializer binds a schema descriptor to a record type:
//!
//! - `represent` projects a record onto its readable fields
//! - `validate` checks raw input and keeps the writable fields
//! - `create` builds, hashes and persists a new record
//!
//! Every operation is stateless and request-scoped. Server-side fields
//! (owner, clock) come from [`RequestContext`], never from input.

mod errors;
mod feed_item;
mod hello;
mod plain;
pub mod projection;
mod user_profile;

pub use errors::{SerializerError, SerializerResult};
pub use feed_item::ProfileFeedItemSerializer;
pub use hello::HelloSerializer;
pub use plain::PlainSerializer;
pub use projection::{serialize, serialize_many};
pub use user_profile::UserProfileSerializer;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{Model, RecordId};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{SchemaDescriptor, SchemaValidator, ValidatedFields, ValidationError};
use crate::store::StorageError;

/// Server-side facts about the request being served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated profile, if any
    pub user: Option<RecordId>,
    /// Clock reading used for creation timestamps
    pub now: DateTime<Utc>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            now: Utc::now(),
        }
    }

    pub fn authenticated(user: RecordId) -> Self {
        Self {
            user: Some(user),
            now: Utc::now(),
        }
    }

    /// Pin the clock
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Schema-bound validation
pub trait Serializer {
    fn schema(&self) -> &SchemaDescriptor;

    /// Validate raw input against this serializer's schema.
    fn validate(&self, input: &Value) -> Result<ValidatedFields, ValidationError> {
        SchemaValidator::new(self.schema()).validate(input).map_err(|err| {
            let fields = err.fields().join(",");
            log_event_with_fields(
                Event::ValidationRejected,
                &[("fields", fields.as_str()), ("schema", err.schema())],
            );
            err
        })
    }
}

/// Serializer backed by a storage record
pub trait ModelSerializer: Serializer {
    type Model: Model;

    /// Wire object for one record
    fn represent(&self, record: &Self::Model) -> Value {
        serialize(record, self.schema())
    }

    /// Wire array for a list of records
    fn represent_many(&self, records: &[Self::Model]) -> Value {
        serialize_many(records, self.schema())
    }

    /// Build and persist a new record from validated input
    fn create(&self, validated: ValidatedFields, context: &RequestContext) -> SerializerResult<Self::Model>;

    /// Validate, create and represent in one step
    fn save(&self, input: &Value, context: &RequestContext) -> SerializerResult<Value> {
        let validated = self.validate(input)?;
        let record = self.create(validated, context)?;
        Ok(self.represent(&record))
    }
}

/// Log the outcome of a create
fn log_created<M: Model>(schema: &SchemaDescriptor, record: &M) {
    let id = record.id().map(|id| id.to_string()).unwrap_or_default();
    log_event_with_fields(
        Event::RecordCreated,
        &[("id", id.as_str()), ("schema", schema.name.as_str())],
    );
}

/// Log a storage failure; the caller propagates the error
fn log_storage_failure(schema: &SchemaDescriptor, err: &StorageError) {
    let reason = err.to_string();
    log_event_with_fields(
        Event::StorageFailed,
        &[("error", reason.as_str()), ("schema", schema.name.as_str())],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_context_constructors() {
        assert_eq!(RequestContext::anonymous().user, None);
        assert_eq!(RequestContext::authenticated(3).user, Some(3));

        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(RequestContext::authenticated(3).at(at).now, at);
    }
}
