//! talawa - CLI for browsing paginated Talawa collections.
//!
//! Lists posts, comments and up-voters from a Talawa API server or a local
//! snapshot directory, one page at a time or exhaustively.

mod backend;
mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Posts(args) => commands::posts::run(args, &cli.connection).await,
        Commands::Comments(args) => commands::comments::run(args, &cli.connection).await,
        Commands::UpVoters(args) => commands::up_voters::run(args, &cli.connection).await,
        Commands::Config(cmd) => commands::config::handle(cmd).await,
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }
}
