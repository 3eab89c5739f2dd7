//! profiles-api - schema-driven record transformer
//!
//! Converts profile records to and from their wire form:
//! validates input against declarative schema descriptors, hashes
//! credentials before persistence, and never emits write-only fields.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod models;
pub mod observability;
pub mod schema;
pub mod serializers;
pub mod store;
