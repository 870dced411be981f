//! docschat entry point.
//!
//! Binary name: `docschat`
//!
//! Parses CLI arguments, sets up logging on stderr, loads configuration and
//! dispatches to the command handler. Any error ends the process with exit
//! code 1 after a single `error: ...` line.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use docschat_infra::config::load_chat_config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with streamed answers.
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,docschat=debug",
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

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_chat_config(cli.config.as_deref()).await;

    match cli.command {
        Commands::Chat { spec, provider } => {
            cli::chat::loop_runner::run_chat(&spec, &provider, config).await
        }
        Commands::Ask {
            spec,
            provider,
            question,
        } => cli::ask::ask_once(&spec, &provider, &question.join(" "), config).await,
        Commands::Models { key, json } => cli::models::list_models(&key, json, config).await,
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "docschat", &mut std::io::stdout());
            Ok(())
        }
    }
}
