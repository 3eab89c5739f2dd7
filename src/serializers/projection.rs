//! Record to wire projection

use serde_json::{Map, Value};

use crate::models::Model;
use crate::schema::SchemaDescriptor;

/// Projects storage fields onto the readable fields of `schema`.
///
/// Keys follow schema order. Write-only and credential fields are never
/// emitted; fields the record lacks are omitted.
pub fn project(fields: &Map<String, Value>, schema: &SchemaDescriptor) -> Value {
    let mut wire = Map::new();
    for field in schema.readable_fields().filter(|f| !f.credential) {
        if let Some(value) = fields.get(&field.name) {
            wire.insert(field.name.clone(), value.clone());
        }
    }
    Value::Object(wire)
}

/// Wire object for one record
pub fn serialize<M: Model>(record: &M, schema: &SchemaDescriptor) -> Value {
    project(&record.to_fields(), schema)
}

/// Wire array for a list of records
pub fn serialize_many<M: Model>(records: &[M], schema: &SchemaDescriptor) -> Value {
    Value::Array(records.iter().map(|r| serialize(r, schema)).collect())
}
