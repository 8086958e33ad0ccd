//! Configuration handling for the PG MCP Server.
//!
//! All connection settings come from the `PG_*` environment variables used by
//! the original deployment; each is also reachable as a CLI flag for local
//! testing. Required values are validated after parsing so the process can
//! report every missing variable at once and exit with status 1.

use crate::error::{ServerError, ServerResult};
use clap::Parser;
use sqlx::postgres::PgConnectOptions;

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Server configuration parsed from CLI arguments and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pg-mcp-server",
    version,
    about = "MCP server exposing a read-only SQL query tool for PostgreSQL"
)]
pub struct Config {
    /// Database host
    #[arg(long, env = "PG_HOST")]
    pub host: Option<String>,

    /// Database port (defaults to 5432 when unset or unparseable)
    #[arg(long, env = "PG_PORT")]
    pub port: Option<String>,

    /// Database user
    #[arg(long, env = "PG_USER")]
    pub user: Option<String>,

    /// Database password (sensitive - not logged)
    #[arg(long, env = "PG_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, env = "PG_DATABASE")]
    pub database: Option<String>,

    /// Maximum connections in the pool
    #[arg(long, env = "PG_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Log level filter when RUST_LOG is unset (e.g. "info", "debug")
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Output logs in JSON format
    #[arg(long, env = "JSON_LOGS", default_value_t = false)]
    pub json_logs: bool,
}

impl Config {
    /// Names of the required environment variables that are not set.
    ///
    /// An empty string counts as missing, matching how a blank variable in a
    /// wrapper script would behave.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_unset(&self.host) {
            missing.push("PG_HOST");
        }
        if is_unset(&self.user) {
            missing.push("PG_USER");
        }
        if is_unset(&self.password) {
            missing.push("PG_PASSWORD");
        }
        if is_unset(&self.database) {
            missing.push("PG_DATABASE");
        }
        missing
    }

    /// Effective port: PG_PORT parsed as an integer, 5432 when unset or
    /// unparseable.
    pub fn resolved_port(&self) -> u16 {
        self.port
            .as_deref()
            .map(|raw| raw.trim().parse().unwrap_or(DEFAULT_PORT))
            .unwrap_or(DEFAULT_PORT)
    }

    /// Build PostgreSQL connection options from the configured values.
    ///
    /// Fails with a configuration error if a required value is absent; callers
    /// are expected to have checked `missing_required` already, so this is a
    /// backstop rather than the primary validation path.
    pub fn connect_options(&self) -> ServerResult<PgConnectOptions> {
        let required = |value: &Option<String>, name: &str| -> ServerResult<String> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(v.clone()),
                _ => Err(ServerError::config(format!("{} is not set", name))),
            }
        };

        Ok(PgConnectOptions::new()
            .host(&required(&self.host, "PG_HOST")?)
            .port(self.resolved_port())
            .username(&required(&self.user, "PG_USER")?)
            .password(&required(&self.password, "PG_PASSWORD")?)
            .database(&required(&self.database, "PG_DATABASE")?))
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        Config {
            host: Some("localhost".to_string()),
            port: Some("5433".to_string()),
            user: Some("postgres".to_string()),
            password: Some("secret".to_string()),
            database: Some("products".to_string()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    #[test]
    fn test_full_config_has_no_missing_fields() {
        assert!(full_config().missing_required().is_empty());
    }

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let config = Config {
            host: None,
            password: None,
            ..full_config()
        };
        assert_eq!(config.missing_required(), vec!["PG_HOST", "PG_PASSWORD"]);
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let config = Config {
            user: Some("   ".to_string()),
            ..full_config()
        };
        assert_eq!(config.missing_required(), vec!["PG_USER"]);
    }

    #[test]
    fn test_port_parses_configured_value() {
        assert_eq!(full_config().resolved_port(), 5433);
    }

    #[test]
    fn test_port_defaults_when_unset() {
        let config = Config {
            port: None,
            ..full_config()
        };
        assert_eq!(config.resolved_port(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_defaults_when_unparseable() {
        for raw in ["not-a-port", "", "70000", "54.32"] {
            let config = Config {
                port: Some(raw.to_string()),
                ..full_config()
            };
            assert_eq!(config.resolved_port(), DEFAULT_PORT, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_connect_options_succeeds_with_full_config() {
        assert!(full_config().connect_options().is_ok());
    }

    #[test]
    fn test_connect_options_rejects_missing_database() {
        let config = Config {
            database: None,
            ..full_config()
        };
        let err = config.connect_options().unwrap_err();
        assert!(err.to_string().contains("PG_DATABASE"));
    }
}
