//! Profile feed item serializer
//!
//! `user_profile` and `created_on` are read-only: the owner is the
//! authenticated profile and the timestamp is the request clock.

use crate::models::{ProfileFeedItem, UserProfile};
use crate::schema::{builtin, SchemaDescriptor, ValidatedFields};
use crate::store::Store;

use super::{
    log_created, log_storage_failure, ModelSerializer, RequestContext, Serializer, SerializerError,
    SerializerResult,
};

pub struct ProfileFeedItemSerializer<'a> {
    schema: SchemaDescriptor,
    items: &'a dyn Store<ProfileFeedItem>,
    profiles: &'a dyn Store<UserProfile>,
}

impl<'a> ProfileFeedItemSerializer<'a> {
    pub fn new(items: &'a dyn Store<ProfileFeedItem>, profiles: &'a dyn Store<UserProfile>) -> Self {
        Self {
            schema: builtin::profile_feed_item(),
            items,
            profiles,
        }
    }
}

impl Serializer for ProfileFeedItemSerializer<'_> {
    fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }
}

impl ModelSerializer for ProfileFeedItemSerializer<'_> {
    type Model = ProfileFeedItem;

    fn create(&self, validated: ValidatedFields, context: &RequestContext) -> SerializerResult<ProfileFeedItem> {
        let owner = context.user.ok_or(SerializerError::MissingContext("user_profile"))?;

        // Owner must exist; NotFound propagates as-is
        self.profiles.fetch(owner).map_err(|err| {
            log_storage_failure(&self.schema, &err);
            err
        })?;

        let item = ProfileFeedItem::new(owner, validated.require_str("status_text")?, context.now);

        let item = self.items.save(item).map_err(|err| {
            log_storage_failure(&self.schema, &err);
            err
        })?;

        log_created(&self.schema, &item);
        Ok(item)
    }
}
