//! ldlog CLI - view, clear and capture a debug log in local time

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_mode(cli.json);

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Diagnostics go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ldlog={}", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let ctx = match Context::load(cli.root) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Show(args) => show::execute(&ctx, args),
        Commands::Clear(args) => clear::execute(&ctx, args),
        Commands::Validate { path } => validate::execute(&ctx, &path),
        Commands::Timezone => timezone::execute(&ctx),
        Commands::Write(args) => write::execute(&ctx, args),
        Commands::Settings { action } => settings::execute(ctx, action),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
