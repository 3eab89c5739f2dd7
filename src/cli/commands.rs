//! CLI command implementations
//!
//! Every command loads configuration first, then builds the schema
//! registry (built-ins plus `schema_dir`). `serve` keeps one [`Session`]
//! for the whole run; its stores live only as long as the process.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::credentials::Argon2Hasher;
use crate::models::{ProfileFeedItem, RecordId, UserProfile};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::SchemaRegistry;
use crate::serializers::projection::project;
use crate::serializers::{
    ModelSerializer, PlainSerializer, ProfileFeedItemSerializer, RequestContext, Serializer,
    UserProfileSerializer,
};
use crate::store::{MemoryStore, Store};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{
    error_envelope, parse_request, read_line, read_requests, response_envelope, write_error, write_json, write_response,
};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    Logger::set_min_severity(config.min_severity()?);

    let source = cli
        .config
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("log_level", config.log_level.as_str()), ("source", source.as_str())],
    );

    let registry = build_registry(&config)?;

    match cli.command {
        Command::Validate { schema } => validate(&registry, &schema),
        Command::Schema { name } => schema(&registry, name.as_deref()),
        Command::Serve => serve(&config, &registry),
    }
}

/// Built-ins plus every descriptor under `schema_dir`
pub fn build_registry(config: &Config) -> CliResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::with_builtins();
    if let Some(dir) = &config.schema_dir {
        registry.load_dir(dir)?;
    }
    Ok(registry)
}

/// Validate one object from stdin and echo its cleaned, readable fields.
///
/// Every outcome, including unreadable input, is answered with an envelope.
pub fn validate(registry: &SchemaRegistry, name: &str) -> CliResult<()> {
    match read_line().and_then(|line| validate_line(registry, name, &line)) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(&e)?;
            Err(e)
        }
    }
}

/// Print one descriptor, or the list of registered names
pub fn schema(registry: &SchemaRegistry, name: Option<&str>) -> CliResult<()> {
    let data = match name {
        Some(name) => serde_json::to_value(registry.require(name)?)?,
        None => json!(registry.names().collect::<Vec<_>>()),
    };
    write_response(data)
}

/// Answer line-delimited requests until stdin closes.
///
/// A bad request gets an error envelope and the loop continues; only a
/// failure to read stdin or write stdout ends it.
pub fn serve(config: &Config, registry: &SchemaRegistry) -> CliResult<()> {
    let session = Session::new(config, registry)?;

    for line in read_requests() {
        let response = match line? {
            Ok(request) => session.respond(request),
            Err(e) => error_envelope(&e),
        };
        write_json(&response)?;
    }

    Ok(())
}

fn validate_line(registry: &SchemaRegistry, name: &str, line: &str) -> CliResult<Value> {
    let input = parse_request(line)?;
    validate_value(registry, name, &input)
}

fn validate_value(registry: &SchemaRegistry, name: &str, input: &Value) -> CliResult<Value> {
    let serializer = PlainSerializer::new(registry.require(name)?);
    let validated = serializer.validate(input)?;
    Ok(serializer.echo(&validated))
}

/// Record resources a session can create and read
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    UserProfile,
    ProfileFeedItem,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Validate,
    Create,
    Retrieve,
    List,
}

/// One line of `serve` input
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    pub op: Operation,

    /// Record resource
    #[serde(default)]
    pub resource: Option<Resource>,

    /// Registered schema name; `validate` prefers it over `resource`
    #[serde(default)]
    pub schema: Option<String>,

    #[serde(default)]
    pub data: Value,

    /// Authenticated profile id
    #[serde(default)]
    pub user: Option<RecordId>,

    /// Record id (retrieve)
    #[serde(default)]
    pub id: Option<RecordId>,
}

/// Stores and collaborators shared by every request of one `serve` run
pub struct Session<'r> {
    registry: &'r SchemaRegistry,
    profiles: MemoryStore<UserProfile>,
    items: MemoryStore<ProfileFeedItem>,
    hasher: Argon2Hasher,
}

impl<'r> Session<'r> {
    pub fn new(config: &Config, registry: &'r SchemaRegistry) -> CliResult<Self> {
        Ok(Self {
            registry,
            profiles: MemoryStore::new(),
            items: MemoryStore::new(),
            hasher: Argon2Hasher::new(&config.hasher)?,
        })
    }

    /// Parse and handle one raw request, always producing an envelope
    pub fn respond(&self, raw: Value) -> Value {
        let result = serde_json::from_value::<Request>(raw)
            .map_err(|e| CliError::invalid_request(e.to_string()))
            .and_then(|request| self.handle(&request));

        match result {
            Ok(data) => response_envelope(data),
            Err(e) => error_envelope(&e),
        }
    }

    pub fn handle(&self, request: &Request) -> CliResult<Value> {
        if let (Operation::Validate, Some(name)) = (request.op, &request.schema) {
            return validate_value(self.registry, name, &request.data);
        }

        let resource = request
            .resource
            .ok_or_else(|| CliError::invalid_request("missing 'resource'"))?;
        let context = match request.user {
            Some(user) => RequestContext::authenticated(user),
            None => RequestContext::anonymous(),
        };

        match resource {
            Resource::UserProfile => {
                let serializer = UserProfileSerializer::new(&self.profiles, &self.hasher);
                self.dispatch(&serializer, &self.profiles, request, &context)
            }
            Resource::ProfileFeedItem => {
                let serializer = ProfileFeedItemSerializer::new(&self.items, &self.profiles);
                self.dispatch(&serializer, &self.items, request, &context)
            }
        }
    }

    fn dispatch<S: ModelSerializer>(
        &self,
        serializer: &S,
        store: &MemoryStore<S::Model>,
        request: &Request,
        context: &RequestContext,
    ) -> CliResult<Value> {
        match request.op {
            Operation::Create => Ok(serializer.save(&request.data, context)?),
            Operation::Retrieve => {
                let id = request.id.ok_or_else(|| CliError::invalid_request("missing 'id'"))?;
                Ok(serializer.represent(&store.fetch(id)?))
            }
            Operation::List => Ok(serializer.represent_many(&store.all()?)),
            Operation::Validate => {
                let validated = serializer.validate(&request.data)?;
                Ok(project(validated.as_map(), serializer.schema()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::HasherConfig;

    fn cheap_config() -> Config {
        Config {
            hasher: HasherConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_create_then_retrieve_profile() {
        let registry = SchemaRegistry::with_builtins();
        let session = Session::new(&cheap_config(), &registry).unwrap();

        let created = session.respond(json!({
            "op": "create",
            "resource": "user_profile",
            "data": {"email": "a@x.com", "name": "Al", "password": "hunter2"}
        }));
        assert_eq!(
            created,
            json!({"status": "ok", "data": {"id": 1, "email": "a@x.com", "name": "Al"}})
        );

        let fetched = session.respond(json!({"op": "retrieve", "resource": "user_profile", "id": 1}));
        assert_eq!(fetched["data"]["email"], "a@x.com");
        assert!(fetched["data"].get("password").is_none());
    }

    #[test]
    fn test_feed_item_requires_user() {
        let registry = SchemaRegistry::with_builtins();
        let session = Session::new(&cheap_config(), &registry).unwrap();

        let response = session.respond(json!({
            "op": "create",
            "resource": "profile_feed_item",
            "data": {"status_text": "hi"}
        }));
        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "PROFILES_AUTHENTICATION_REQUIRED");
    }

    #[test]
    fn test_feed_item_list_for_owner() {
        let registry = SchemaRegistry::with_builtins();
        let session = Session::new(&cheap_config(), &registry).unwrap();

        session.respond(json!({
            "op": "create",
            "resource": "user_profile",
            "data": {"email": "a@x.com", "name": "Al", "password": "pw"}
        }));
        let created = session.respond(json!({
            "op": "create",
            "resource": "profile_feed_item",
            "user": 1,
            "data": {"status_text": "hello", "user_profile": 9}
        }));
        assert_eq!(created["data"]["user_profile"], 1);

        let listed = session.respond(json!({"op": "list", "resource": "profile_feed_item"}));
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_validate_reports_field_details() {
        let registry = SchemaRegistry::with_builtins();
        let session = Session::new(&cheap_config(), &registry).unwrap();

        let response = session.respond(json!({
            "op": "validate",
            "schema": "hello",
            "data": {"name": "Bartholomew"}
        }));
        assert_eq!(response["code"], "PROFILES_VALIDATION_FAILED");
        assert!(response["details"]["name"].is_array());
    }

    #[test]
    fn test_validate_by_resource() {
        let registry = SchemaRegistry::with_builtins();
        let session = Session::new(&cheap_config(), &registry).unwrap();

        let response = session.respond(json!({
            "op": "validate",
            "resource": "profile_feed_item",
            "data": {"status_text": "  hi  ", "created_on": "not a time"}
        }));
        assert_eq!(response, json!({"status": "ok", "data": {"status_text": "hi"}}));
    }

    #[test]
    fn test_validate_echo_hides_credential() {
        let registry = SchemaRegistry::with_builtins();
        let data = validate_value(
            &registry,
            "user_profile",
            &json!({"email": "a@x.com", "name": "Al", "password": "hunter2"}),
        )
        .unwrap();
        assert_eq!(data, json!({"email": "a@x.com", "name": "Al"}));
    }

    #[test]
    fn test_validate_line_rejects_malformed_json() {
        let registry = SchemaRegistry::with_builtins();

        let err = validate_line(&registry, "hello", "{bad\n").unwrap_err();
        assert_eq!(err.code_str(), "PROFILES_CLI_INVALID_REQUEST");
        let envelope = error_envelope(&err);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["code"], "PROFILES_CLI_INVALID_REQUEST");

        let empty = validate_line(&registry, "hello", "").unwrap_err();
        assert_eq!(empty.code_str(), "PROFILES_CLI_INVALID_REQUEST");

        let ok = validate_line(&registry, "hello", "{\"name\": \" Al \"}\n").unwrap();
        assert_eq!(ok, json!({"name": "Al"}));
    }

    #[test]
    fn test_unknown_schema() {
        let registry = SchemaRegistry::with_builtins();
        let err = validate_value(&registry, "nope", &json!({})).unwrap_err();
        assert_eq!(err.code_str(), "PROFILES_UNKNOWN_SCHEMA");
    }

    #[test]
    fn test_malformed_request_keeps_session_alive() {
        let registry = SchemaRegistry::with_builtins();
        let session = Session::new(&cheap_config(), &registry).unwrap();

        let bad = session.respond(json!({"op": "destroy"}));
        assert_eq!(bad["code"], "PROFILES_CLI_INVALID_REQUEST");

        let missing = session.respond(json!({"op": "retrieve", "resource": "user_profile", "id": 5}));
        assert_eq!(missing["code"], "PROFILES_NOT_FOUND");
    }
}
