//! # Profile Feed Item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{format_timestamp, Model, RecordId};

/// A status update owned by one user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFeedItem {
    pub id: Option<RecordId>,
    /// Owning profile id
    pub user_profile: RecordId,
    pub status_text: String,
    pub created_on: DateTime<Utc>,
}

impl ProfileFeedItem {
    pub fn new(user_profile: RecordId, status_text: impl Into<String>, created_on: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_profile,
            status_text: status_text.into(),
            created_on,
        }
    }
}

impl Model for ProfileFeedItem {
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
        fields.insert("user_profile".into(), Value::from(self.user_profile));
        fields.insert("status_text".into(), Value::String(self.status_text.clone()));
        fields.insert("created_on".into(), Value::String(format_timestamp(&self.created_on)));
        fields
    }
}
