//! # Records
//!
//! Storage-layer entities the transformer reads from and creates.

mod feed_item;
mod user_profile;

pub use feed_item::ProfileFeedItem;
pub use user_profile::UserProfile;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Storage-assigned record identity
pub type RecordId = u64;

/// A storage-layer record
pub trait Model: Clone + Send + Sync {
    /// Identity, `None` until first saved
    fn id(&self) -> Option<RecordId>;

    fn assign_id(&mut self, id: RecordId);

    /// Every stored field keyed by name, including fields the wire never sees
    fn to_fields(&self) -> Map<String, Value>;
}

/// Wire form of a timestamp: RFC 3339, UTC, microseconds, `Z` suffix
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(&at), "2024-05-01T10:30:00.000000Z");
    }
}
