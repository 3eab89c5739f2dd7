//! CLI argument definitions using clap
//!
//! Commands:
//! - profiles-api validate --schema <name>
//! - profiles-api schema [name]
//! - profiles-api serve

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Profiles API - schema-driven validation and serialization of profile records
#[derive(Parser, Debug)]
#[command(name = "profiles-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one JSON object read from stdin
    Validate {
        /// Registered schema name
        #[arg(long)]
        schema: String,
    },

    /// Print a schema descriptor, or list registered names
    Schema {
        /// Schema name
        name: Option<String>,
    },

    /// Process line-delimited requests from stdin against in-memory stores
    Serve,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["profiles-api", "validate", "--schema", "user_profile"]).unwrap();
        match cli.command {
            Command::Validate { schema } => assert_eq!(schema, "user_profile"),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_config_is_global() {
        let cli = Cli::try_parse_from(["profiles-api", "serve", "--config", "profiles.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("profiles.json")));
    }

    #[test]
    fn test_schema_name_optional() {
        let cli = Cli::try_parse_from(["profiles-api", "schema"]).unwrap();
        assert!(matches!(cli.command, Command::Schema { name: None }));
    }
}
