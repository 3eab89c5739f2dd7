//! Input validation against a schema descriptor
//!
//! Validation semantics:
//! - Input must be a JSON object
//! - Read-only and undeclared keys are ignored
//! - Required writable fields must be present
//! - Null values are rejected
//! - Types match exactly, no coercion
//! - Strings are trimmed unless the field preserves whitespace
//! - Blank strings are rejected unless the field allows them
//! - Every constraint is checked; all violations are reported together

use std::sync::OnceLock;

use chrono::DateTime;
use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{FieldError, ValidationError};
use super::types::{Constraint, FieldSpec, FieldType, SchemaDescriptor};

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Dot-separated local part; domain is `localhost` or non-empty
/// hostname labels ending in an alphabetic TLD.
fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[^@\s.]+(?:\.[^@\s.]+)*@(?:localhost|(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63})$",
        )
        .expect("email pattern compiles")
    })
}

/// Writable fields that passed validation, cleaned and keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedFields {
    schema: String,
    values: Map<String, Value>,
}

impl ValidatedFields {
    /// Returns the name of the schema these fields were validated against
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Returns a string field, or a validation error naming it
    pub fn require_str(&self, name: &str) -> Result<&str, ValidationError> {
        self.get_str(name)
            .ok_or_else(|| ValidationError::single(&self.schema, FieldError::missing_field(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// Validates raw input against one schema descriptor.
///
/// The validator does not mutate its input and is deterministic.
pub struct SchemaValidator<'a> {
    schema: &'a SchemaDescriptor,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a SchemaDescriptor) -> Self {
        Self { schema }
    }

    /// Validates an input object.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every offending field.
    pub fn validate(&self, input: &Value) -> Result<ValidatedFields, ValidationError> {
        let obj = input.as_object().ok_or_else(|| {
            ValidationError::single(
                &self.schema.name,
                FieldError::type_mismatch("$root", "object", json_type_name(input)),
            )
        })?;

        let mut values = Map::new();
        let mut errors = Vec::new();

        for field in self.schema.writable_fields() {
            match obj.get(&field.name) {
                Some(value) => match clean_value(field, value) {
                    Ok(cleaned) => {
                        values.insert(field.name.clone(), cleaned);
                    }
                    Err(mut field_errors) => errors.append(&mut field_errors),
                },
                None if field.required => errors.push(FieldError::missing_field(&field.name)),
                None => {}
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError::new(&self.schema.name, errors));
        }

        Ok(ValidatedFields {
            schema: self.schema.name.clone(),
            values,
        })
    }
}

/// Checks one present value and returns its cleaned form.
fn clean_value(field: &FieldSpec, value: &Value) -> Result<Value, Vec<FieldError>> {
    if value.is_null() {
        return Err(vec![FieldError::null_value(&field.name)]);
    }

    match field.field_type {
        FieldType::String => clean_string(field, value),
        FieldType::Int => {
            if value.is_i64() || value.is_u64() {
                Ok(value.clone())
            } else {
                Err(vec![type_error(field, value)])
            }
        }
        FieldType::Reference => match value.as_u64() {
            Some(_) => Ok(value.clone()),
            None => Err(vec![type_error(field, value)]),
        },
        FieldType::Timestamp => {
            let raw = value.as_str().ok_or_else(|| vec![type_error(field, value)])?;
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|_| Value::String(raw.trim().to_string()))
                .map_err(|_| vec![FieldError::new(&field.name, "RFC 3339 timestamp", "unparseable string")])
        }
    }
}

fn clean_string(field: &FieldSpec, value: &Value) -> Result<Value, Vec<FieldError>> {
    let raw = value.as_str().ok_or_else(|| vec![type_error(field, value)])?;
    let text = if field.trim_whitespace { raw.trim() } else { raw };

    if text.is_empty() {
        if field.allow_blank {
            return Ok(Value::String(String::new()));
        }
        return Err(vec![FieldError::blank(&field.name)]);
    }

    let errors: Vec<FieldError> = field
        .constraints
        .iter()
        .filter_map(|constraint| check_constraint(&field.name, constraint, text))
        .collect();

    if errors.is_empty() {
        Ok(Value::String(text.to_string()))
    } else {
        Err(errors)
    }
}

fn check_constraint(name: &str, constraint: &Constraint, text: &str) -> Option<FieldError> {
    match constraint {
        Constraint::MaxLength { limit } => {
            let length = text.chars().count();
            (length > *limit).then(|| FieldError::too_long(name, *limit, length))
        }
        Constraint::Email => (!email_pattern().is_match(text)).then(|| FieldError::invalid_email(name)),
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: &FieldSpec, actual: &Value) -> FieldError {
    FieldError::type_mismatch(&field.name, field.field_type.type_name(), json_type_name(actual))
}
