mod cli;
mod commands;
mod config;
mod console;
mod error;
mod output;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use ambilight_core::Session;

use crate::cli::{Cli, Command};
use crate::console::ConsoleView;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli, &matches).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli, matches: &ArgMatches) -> Result<(), CliError> {
    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "ambilight", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config()?;
    config::apply_display_defaults(&mut cli.global, matches, &cfg.defaults)?;

    match cli.command {
        // Config commands don't need a bridge
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, cfg),

        Command::Completions(_) => Ok(()),

        // Everything else talks to the bridge
        cmd => {
            let session_config = config::build_session_config(&cli.global, &cfg)?;
            let color = output::should_color(&cli.global.color);
            let session = Session::new(session_config, ConsoleView::new(color))?;

            tracing::debug!(command = ?cmd, bridge = %session.client().endpoint(), "dispatching command");
            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}
