//! Schema registry
//!
//! Descriptors are held by name. A registry starts empty or with the
//! built-in descriptors, and can pick up extra descriptors from `*.json`
//! files in a directory. Registered descriptors are immutable.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::observability::{log_event_with_fields, Event};

use super::builtin;
use super::errors::{SchemaError, SchemaResult};
use super::types::SchemaDescriptor;

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, SchemaDescriptor>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in descriptors.
    pub fn with_builtins() -> Self {
        let schemas = builtin::all()
            .into_iter()
            .map(|schema| (schema.name.clone(), schema))
            .collect();
        Self { schemas }
    }

    /// Loads every `*.json` descriptor in `dir`.
    ///
    /// A missing directory loads nothing. Unreadable or malformed files
    /// are fatal. Returns the number of descriptors loaded.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }

        // Directory order is platform-dependent
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }

        Ok(paths.len())
    }

    fn load_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: SchemaDescriptor = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        let name = schema.name.clone();
        let field_count = schema.fields.len().to_string();
        self.insert(schema)?;

        let source = path.display().to_string();
        log_event_with_fields(
            Event::SchemaLoaded,
            &[
                ("fields", field_count.as_str()),
                ("path", source.as_str()),
                ("schema", name.as_str()),
            ],
        );

        Ok(())
    }

    /// Registers a descriptor built in code.
    pub fn register(&mut self, schema: SchemaDescriptor) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;
        self.insert(schema)
    }

    fn insert(&mut self, schema: SchemaDescriptor) -> SchemaResult<()> {
        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::schema_immutable(&schema.name));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.schemas.get(name)
    }

    /// Gets a descriptor or fails with `PROFILES_UNKNOWN_SCHEMA`.
    pub fn require(&self, name: &str) -> SchemaResult<&SchemaDescriptor> {
        self.get(name).ok_or_else(|| SchemaError::unknown_schema(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
