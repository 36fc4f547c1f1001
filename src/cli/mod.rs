//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod registrar;

pub use args::{build_cli, Cli, Commands, GlobalOpts};
pub use output::OutputFormat;
pub use registrar::{CommandError, Context, ResourceCommand};

use clap::{ArgMatches, FromArgMatches};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};

use crate::core::client::{ApiClient, HttpTransport};
use crate::core::Config;

/// Parse the process arguments and run the selected command
pub fn run() -> Result<()> {
    let resources = commands::resources();
    let matches = build_cli(&resources).get_matches();
    let global = GlobalOpts::from_arg_matches(&matches).into_diagnostic()?;

    crate::logging::init(global.verbose, global.quiet).map_err(|e| miette::miette!("{}", e))?;

    if matches
        .subcommand_name()
        .is_some_and(|name| resources.iter().any(|r| r.name() == name))
    {
        let config = effective_config(&global)?;
        let output = config.output().parse::<OutputFormat>().into_diagnostic()?;
        let transport = HttpTransport::new(config.api_url(), config.token.clone()).into_diagnostic()?;
        let client = ApiClient::new(transport);
        let ctx = Context {
            client: &client,
            output,
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Some(result) = dispatch(&resources, &matches, &ctx, &mut out) {
            result.into_diagnostic()?;
        }
        return out.flush().into_diagnostic();
    }

    let cli = Cli::from_arg_matches(&matches).into_diagnostic()?;
    match cli.command {
        Commands::Config(cmd) => commands::config::run(cmd),
        Commands::Completions(args) => {
            commands::completions::run(&args, build_cli(&resources), &mut io::stdout());
            Ok(())
        }
    }
}

/// Run the resource command selected in the root `matches`
///
/// Returns `None` when the selected subcommand is not a registered resource.
pub fn dispatch(
    resources: &[Box<dyn ResourceCommand>],
    matches: &ArgMatches,
    ctx: &Context<'_>,
    out: &mut dyn Write,
) -> Option<std::result::Result<(), CommandError>> {
    let (name, sub) = matches.subcommand()?;
    let resource = resources.iter().find(|r| r.name() == name)?;
    tracing::debug!(resource = name, output = %ctx.output, "dispatching");
    Some(resource.run(sub, ctx, out))
}

/// Configuration from every layer, with command-line options on top
pub fn effective_config(global: &GlobalOpts) -> Result<Config> {
    let mut config = Config::load().into_diagnostic()?;
    config.merge(Config {
        api_url: global.api_url.clone(),
        token: global.token.clone(),
        output: global.output.map(|format| format.to_string()),
    });
    Ok(config)
}
