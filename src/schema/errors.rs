//! Schema and validation error types
//!
//! Error codes:
//! - PROFILES_VALIDATION_FAILED (REJECT)
//! - PROFILES_UNKNOWN_SCHEMA (REJECT)
//! - PROFILES_SCHEMA_IMMUTABLE (REJECT)
//! - PROFILES_MALFORMED_SCHEMA (FATAL)

use std::fmt;

use serde_json::{Map, Value};

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
    /// Descriptor set is unusable, startup must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// One violated field constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name, or `$root` when the input itself is unusable
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, "non-blank string", "blank string")
    }

    pub fn too_long(field: impl Into<String>, limit: usize, length: usize) -> Self {
        Self::new(
            field,
            format!("at most {} characters", limit),
            format!("{} characters", length),
        )
    }

    pub fn invalid_email(field: impl Into<String>) -> Self {
        Self::new(field, "valid email address", "malformed address")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Input rejected by a schema.
///
/// Carries every offending field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    schema: String,
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub const CODE: &'static str = "PROFILES_VALIDATION_FAILED";

    /// Create a validation error from collected field errors
    pub fn new(schema: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            schema: schema.into(),
            errors,
        }
    }

    /// Create a validation error for a single field
    pub fn single(schema: impl Into<String>, error: FieldError) -> Self {
        Self::new(schema, vec![error])
    }

    /// Returns the name of the schema that rejected the input
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns every field error
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the offending field names
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Returns whether the given field is among the offenders
    pub fn names(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn code(&self) -> &'static str {
        Self::CODE
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }

    pub fn status_code(&self) -> u16 {
        400
    }

    /// Field-keyed error body: `{"email": ["expected ..., got ..."]}`
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        for error in &self.errors {
            let message = Value::String(format!("expected {}, got {}", error.expected, error.actual));
            match body.get_mut(&error.field) {
                Some(Value::Array(messages)) => messages.push(message),
                _ => {
                    body.insert(error.field.clone(), Value::Array(vec![message]));
                }
            }
        }
        Value::Object(body)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: '{}' rejected input", self.severity(), Self::CODE, self.schema)?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Registry error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Descriptor name not registered
    ProfilesUnknownSchema,
    /// Attempt to replace a registered descriptor
    ProfilesSchemaImmutable,
    /// Descriptor file unreadable or structurally invalid
    ProfilesMalformedSchema,
}

impl SchemaErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ProfilesUnknownSchema => "PROFILES_UNKNOWN_SCHEMA",
            SchemaErrorCode::ProfilesSchemaImmutable => "PROFILES_SCHEMA_IMMUTABLE",
            SchemaErrorCode::ProfilesMalformedSchema => "PROFILES_MALFORMED_SCHEMA",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::ProfilesMalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema registry error
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    schema: Option<String>,
}

impl SchemaError {
    pub fn unknown_schema(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::ProfilesUnknownSchema,
            message: format!("Schema '{}' not found", name),
            schema: Some(name),
        }
    }

    pub fn schema_immutable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::ProfilesSchemaImmutable,
            message: format!("Schema '{}' is already registered", name),
            schema: Some(name),
        }
    }

    pub fn malformed_schema(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::ProfilesMalformedSchema,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
            schema: None,
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for registry operations
pub type SchemaResult<T> = Result<T, SchemaError>;
