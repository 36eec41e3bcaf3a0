//! CLI argument definitions using clap
//!
//! Commands:
//! - garagenet draft <entity>
//! - garagenet validate <entity>
//! - garagenet payload <entity>
//! - garagenet submit <entity> --config <path> [--token <token>]
//! - garagenet schema [--model <name>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::schema::EntityName;

/// Veteran's Garage Network directory client
#[derive(Parser, Debug)]
#[command(name = "garagenet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the blank form for an entity
    Draft {
        /// Entity name, e.g. garage or project-part
        #[arg(value_parser = parse_entity)]
        entity: EntityName,
    },

    /// Validate a draft read from stdin
    Validate {
        #[arg(value_parser = parse_entity)]
        entity: EntityName,
    },

    /// Print the create-payload for a draft read from stdin
    Payload {
        #[arg(value_parser = parse_entity)]
        entity: EntityName,
    },

    /// Validate a draft read from stdin and create it on the data service
    Submit {
        #[arg(value_parser = parse_entity)]
        entity: EntityName,

        /// Path to client configuration file
        #[arg(long, default_value = "./garagenet.json")]
        config: PathBuf,

        /// Signed-in user's token; without it the API key is used
        #[arg(long)]
        token: Option<String>,
    },

    /// Print the model catalogue
    Schema {
        /// Only print this model or custom type
        #[arg(long)]
        model: Option<String>,
    },
}

fn parse_entity(value: &str) -> Result<EntityName, String> {
    value.parse()
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
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "garagenet", "submit", "project-part", "--config", "client.json", "--token", "jwt",
        ])
        .unwrap();
        match cli.command {
            Command::Submit { entity, config, token } => {
                assert_eq!(entity, EntityName::ProjectPart);
                assert_eq!(config, PathBuf::from("client.json"));
                assert_eq!(token.as_deref(), Some("jwt"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_entity_rejected() {
        assert!(Cli::try_parse_from(["garagenet", "validate", "spaceship"]).is_err());
    }
}
