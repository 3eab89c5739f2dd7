//! Field and schema descriptors
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit integer
//! - timestamp: RFC 3339 date-time
//! - reference: integer id of another record

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit integer
    Int,
    /// RFC 3339 date-time, always UTC on output
    Timestamp,
    /// Integer id of another record
    Reference,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Timestamp => "timestamp",
            FieldType::Reference => "reference",
        }
    }
}

/// Which direction a field travels across the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Accepted on input, emitted on output
    #[default]
    ReadWrite,
    /// Accepted on input, never emitted
    WriteOnly,
    /// Emitted on output, ignored on input
    ReadOnly,
}

impl Visibility {
    /// Whether the field appears in wire output
    pub fn is_readable(&self) -> bool {
        !matches!(self, Visibility::WriteOnly)
    }

    /// Whether the field is taken from input
    pub fn is_writable(&self) -> bool {
        !matches!(self, Visibility::ReadOnly)
    }
}

/// Value constraint checked during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// Maximum length in characters
    MaxLength { limit: usize },
    /// Must look like an email address
    Email,
}

fn default_true() -> bool {
    true
}

/// Declaration of a single wire field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub visibility: Visibility,
    /// Whether the field must be present on input
    #[serde(default = "default_true")]
    pub required: bool,
    /// Value is hashed before persistence
    #[serde(default)]
    pub credential: bool,
    /// Strip surrounding whitespace from string input
    #[serde(default = "default_true")]
    pub trim_whitespace: bool,
    /// Accept empty strings
    #[serde(default)]
    pub allow_blank: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            visibility: Visibility::ReadWrite,
            required: true,
            credential: false,
            trim_whitespace: true,
            allow_blank: false,
            constraints: Vec::new(),
        }
    }

    /// Create a required read-write string field
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Create a required read-write int field
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int)
    }

    /// Create a required read-write timestamp field
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Timestamp)
    }

    /// Create a required read-write reference field
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Reference)
    }

    pub fn read_only(mut self) -> Self {
        self.visibility = Visibility::ReadOnly;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.visibility = Visibility::WriteOnly;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Mark as a credential. Credentials are always write-only.
    pub fn credential(mut self) -> Self {
        self.credential = true;
        self.visibility = Visibility::WriteOnly;
        self
    }

    pub fn max_length(mut self, limit: usize) -> Self {
        self.constraints.push(Constraint::MaxLength { limit });
        self
    }

    pub fn email(mut self) -> Self {
        self.constraints.push(Constraint::Email);
        self
    }

    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn preserve_whitespace(mut self) -> Self {
        self.trim_whitespace = false;
        self
    }

    /// Returns the max-length limit, if any
    pub fn max_length_limit(&self) -> Option<usize> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::MaxLength { limit } => Some(*limit),
            _ => None,
        })
    }
}

/// Ordered field declarations bound to one record shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields emitted on output, in declaration order
    pub fn readable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.visibility.is_readable())
    }

    /// Fields accepted on input, in declaration order
    pub fn writable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.visibility.is_writable())
    }

    /// The credential field, if the schema declares one
    pub fn credential_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.credential)
    }

    /// Validates the descriptor itself (not an input)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Schema name must not be empty".into());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Field '{}' declared more than once", field.name));
            }

            if field.credential && field.visibility != Visibility::WriteOnly {
                return Err(format!("Credential field '{}' must be write-only", field.name));
            }

            if field.credential && field.field_type != FieldType::String {
                return Err(format!("Credential field '{}' must be a string", field.name));
            }

            if !field.constraints.is_empty() && field.field_type != FieldType::String {
                return Err(format!(
                    "Constraints on '{}' require a string field, found {}",
                    field.name,
                    field.field_type.type_name()
                ));
            }
        }

        if self.fields.iter().filter(|f| f.credential).count() > 1 {
            return Err("At most one credential field is supported".into());
        }

        Ok(())
    }
}
