use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use netpay_cli::{app, cli::Cli, logging, settings::Settings};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    logging::init_logging(cli.log_level.as_deref(), &settings.logging)?;

    debug!(?settings, "settings loaded");
    app::run(&cli, &settings)
}
