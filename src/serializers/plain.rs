//! Validation against any registered descriptor, with no record behind it

use serde_json::Value;

use crate::schema::{SchemaDescriptor, ValidatedFields};

use super::projection::project;
use super::Serializer;

#[derive(Debug, Clone, Copy)]
pub struct PlainSerializer<'a> {
    schema: &'a SchemaDescriptor,
}

impl<'a> PlainSerializer<'a> {
    pub fn new(schema: &'a SchemaDescriptor) -> Self {
        Self { schema }
    }

    /// Echo of validated input with write-only values removed
    pub fn echo(&self, validated: &ValidatedFields) -> Value {
        project(validated.as_map(), self.schema)
    }
}

impl Serializer for PlainSerializer<'_> {
    fn schema(&self) -> &SchemaDescriptor {
        self.schema
    }
}
