//! Schema subsystem
//!
//! A schema descriptor is an ordered list of field declarations bound to one
//! record shape. Each field carries a type, a wire visibility and its
//! constraints.
//!
//! # Design Principles
//!
//! - Write-only fields never reach wire output
//! - Read-only fields never come from input
//! - Validation reports every offending field at once
//! - No coercion between JSON types

pub mod builtin;
mod errors;
mod registry;
mod types;
mod validator;

pub use errors::{FieldError, SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationError};
pub use registry::SchemaRegistry;
pub use types::{Constraint, FieldSpec, FieldType, SchemaDescriptor, Visibility};
pub use validator::{SchemaValidator, ValidatedFields};
