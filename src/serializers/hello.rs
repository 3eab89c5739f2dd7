//! Record-less serializer holding a single short name

use crate::schema::{builtin, SchemaDescriptor};

use super::Serializer;

#[derive(Debug, Clone)]
pub struct HelloSerializer {
    schema: SchemaDescriptor,
}

impl HelloSerializer {
    pub fn new() -> Self {
        Self {
            schema: builtin::hello(),
        }
    }
}

impl Default for HelloSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for HelloSerializer {
    fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }
}
