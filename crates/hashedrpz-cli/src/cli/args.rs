//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// HashedRPZ hasher
///
/// Takes one or more domain names (one per line, on stdin or from files)
/// and hashes them using the HashedRPZ method, so block lists can be
/// distributed as RPZ zones without revealing the domains they contain.
#[derive(Parser, Debug)]
#[command(name = "hasher")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash domain names into HashedRPZ ownernames
    Hash(HashArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Hash command
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct HashArgs {
    /// The HashedRPZ key (in-band and out-of-band parts concatenated)
    #[arg(short, long, env = "HASHEDRPZ_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// The origin domain the hashed names are placed under (e.g. rpz.example.com)
    #[arg(long, env = "HASHEDRPZ_ORIGIN_DOMAIN")]
    pub origin_domain: Option<String>,

    /// Encode names exceeding the maximum length as a wildcard
    /// (over-blocks adjacent labels in the same subdomain)
    #[arg(long, conflicts_with = "ignore_too_long")]
    pub make_wildcard: bool,

    /// Skip names exceeding the maximum length instead of failing
    #[arg(long)]
    pub ignore_too_long: bool,

    /// Echo the original name as a zone comment before each result
    #[arg(long)]
    pub echo_ownername: bool,

    /// Inputs are domains: also output a wildcard to block the names inside them
    #[arg(long)]
    pub add_wildcards: bool,

    /// Append the origin domain to every output name
    #[arg(long)]
    pub append_origin: bool,

    /// Ignore blank lines and lines starting with '#' or ';'
    #[arg(long)]
    pub skip_comments: bool,

    /// Show every hashed level on stderr
    #[arg(long)]
    pub explain: bool,

    /// Files to read names from (stdin when none or '-')
    pub files: Vec<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., key, origin_domain)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_hash_flags() {
        let cli = Cli::try_parse_from([
            "hasher",
            "hash",
            "--key",
            "secret",
            "--origin-domain",
            "rpz.example.net",
            "--make-wildcard",
            "--echo-ownername",
            "-o",
            "json",
            "list.txt",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        let Commands::Hash(args) = cli.command else {
            panic!("expected hash command");
        };
        assert_eq!(args.key.as_deref(), Some("secret"));
        assert_eq!(args.origin_domain.as_deref(), Some("rpz.example.net"));
        assert!(args.make_wildcard);
        assert!(args.echo_ownername);
        assert_eq!(args.files, vec![PathBuf::from("list.txt")]);
    }

    #[test]
    fn wildcard_and_ignore_conflict() {
        let res = Cli::try_parse_from([
            "hasher",
            "hash",
            "--make-wildcard",
            "--ignore-too-long",
        ]);
        assert!(res.is_err());
    }
}
