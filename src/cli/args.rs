//! CLI argument definitions
//!
//! Global options and the built-in subcommands use clap derive; resource
//! subcommands are generated at runtime and merged in by [`build_cli`].

use clap::{CommandFactory, Parser, Subcommand};

use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::config::ConfigCommands;
use crate::cli::output::OutputFormat;
use crate::cli::registrar::ResourceCommand;

#[derive(Parser)]
#[command(name = "resctl")]
#[command(author, version, about = "Manage remote API resources from the command line")]
#[command(long_about = "Manage remote API resources from the command line.\n\nEvery resource supports list, get, create, update and delete. Child resources take their parents through --<parent>-id or --<parent>-name.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format: json, yaml, table, tsv or none
    #[arg(long, short = 'o', global = true, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Base URL of the API server
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer token for the API
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Root command with every resource command attached
pub fn build_cli(resources: &[Box<dyn ResourceCommand>]) -> clap::Command {
    Cli::command().subcommands(resources.iter().map(|resource| resource.command()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::resources;
    use clap::FromArgMatches;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli(&resources()).debug_assert();
    }

    #[test]
    fn test_global_options_reach_resource_commands() {
        let matches = build_cli(&resources())
            .try_get_matches_from([
                "resctl",
                "organization",
                "list",
                "-o",
                "json",
                "--api-url",
                "http://api.test",
            ])
            .unwrap();

        let global = GlobalOpts::from_arg_matches(&matches).unwrap();
        assert_eq!(global.output, Some(OutputFormat::Json));
        assert_eq!(global.api_url.as_deref(), Some("http://api.test"));
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let err = build_cli(&resources())
            .try_get_matches_from(["resctl", "-o", "xml", "organization", "list"])
            .unwrap_err();
        assert!(err.to_string().contains("unsupported output format: xml"));
    }

    #[test]
    fn test_resource_aliases() {
        let matches = build_cli(&resources())
            .try_get_matches_from(["resctl", "ws", "list", "--organization-id=o-1"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("workspace"));
    }
}
