//! Command implementations.

pub mod config;
pub mod hash;

use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,

    /// Where the configuration was loaded from
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Get the key from the command line or config, returning an error if not set.
    pub fn require_key<'a>(&'a self, cli: Option<&'a str>) -> anyhow::Result<&'a str> {
        cli.filter(|key| !key.is_empty())
            .or(self.config.key.as_deref())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Missing HashedRPZ key.\n\n\
                     Set it with one of:\n  \
                     1. --key <KEY>\n  \
                     2. HASHEDRPZ_KEY environment variable\n  \
                     3. hasher config set key <KEY>"
                )
            })
    }

    /// Get the origin domain from the command line or config, returning an error if not set.
    pub fn require_origin<'a>(&'a self, cli: Option<&'a str>) -> anyhow::Result<&'a str> {
        cli.filter(|origin| !origin.is_empty())
            .or(self.config.origin_domain.as_deref())
            .filter(|origin| !origin.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Missing origin domain.\n\n\
                     Set it with one of:\n  \
                     1. --origin-domain rpz.example.com\n  \
                     2. HASHEDRPZ_ORIGIN_DOMAIN environment variable\n  \
                     3. hasher config set origin_domain rpz.example.com"
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config: Config) -> Context {
        Context {
            config,
            config_path: PathBuf::from("config.toml"),
            output_format: OutputFormat::Plain,
        }
    }

    #[test]
    fn command_line_wins_over_config() {
        let ctx = context(Config {
            key: Some("from-config".to_string()),
            origin_domain: Some("rpz.example.org".to_string()),
            ..Config::default()
        });

        assert_eq!(ctx.require_key(Some("from-cli")).unwrap(), "from-cli");
        assert_eq!(ctx.require_key(None).unwrap(), "from-config");
        assert_eq!(ctx.require_origin(None).unwrap(), "rpz.example.org");
    }

    #[test]
    fn empty_command_line_value_falls_back_to_config() {
        let ctx = context(Config {
            key: Some("from-config".to_string()),
            origin_domain: Some("rpz.example.org".to_string()),
            ..Config::default()
        });

        assert_eq!(ctx.require_key(Some("")).unwrap(), "from-config");
        assert_eq!(ctx.require_origin(Some("")).unwrap(), "rpz.example.org");
    }

    #[test]
    fn missing_settings_are_errors() {
        let ctx = context(Config::default());

        assert!(ctx.require_key(None).is_err());
        assert!(ctx.require_key(Some("")).is_err());
        assert!(ctx.require_origin(None).is_err());
    }
}
