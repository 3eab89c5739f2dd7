//! Descriptors for the resources this crate ships with.
//!
//! Field order is wire order.

use super::types::{FieldSpec, SchemaDescriptor};

pub const HELLO: &str = "hello";
pub const USER_PROFILE: &str = "user_profile";
pub const PROFILE_FEED_ITEM: &str = "profile_feed_item";

/// A single short name, used to exercise plain (record-less) validation
pub fn hello() -> SchemaDescriptor {
    SchemaDescriptor::new(HELLO, vec![FieldSpec::string("name").max_length(10)])
        .with_description("Name field for testing out validation")
}

pub fn user_profile() -> SchemaDescriptor {
    SchemaDescriptor::new(
        USER_PROFILE,
        vec![
            FieldSpec::int("id").read_only(),
            FieldSpec::string("email").max_length(255).email(),
            FieldSpec::string("name").max_length(255),
            FieldSpec::string("password").credential().max_length(128),
        ],
    )
    .with_description("User profile objects")
}

pub fn profile_feed_item() -> SchemaDescriptor {
    SchemaDescriptor::new(
        PROFILE_FEED_ITEM,
        vec![
            FieldSpec::int("id").read_only(),
            FieldSpec::reference("user_profile").read_only(),
            FieldSpec::string("status_text").max_length(255),
            FieldSpec::timestamp("created_on").read_only(),
        ],
    )
    .with_description("Profile feed items")
}

/// Every built-in descriptor
pub fn all() -> Vec<SchemaDescriptor> {
    vec![hello(), user_profile(), profile_feed_item()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Visibility;

    #[test]
    fn test_builtins_are_well_formed() {
        for schema in all() {
            assert!(schema.validate_structure().is_ok(), "{} is malformed", schema.name);
        }
    }

    #[test]
    fn test_user_profile_password_is_write_only_credential() {
        let schema = user_profile();
        let password = schema.field("password").unwrap();
        assert!(password.credential);
        assert_eq!(password.visibility, Visibility::WriteOnly);
        assert_eq!(password.max_length_limit(), Some(128));
    }

    #[test]
    fn test_feed_item_owner_is_read_only() {
        let schema = profile_feed_item();
        assert_eq!(schema.field("user_profile").unwrap().visibility, Visibility::ReadOnly);
        assert_eq!(schema.field("created_on").unwrap().visibility, Visibility::ReadOnly);
    }
}
