use anyhow::Result;
use clap::Parser;
use gist_preview::cli::{self, Cli};
use gist_preview_config::LogLevel;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config first so its log level can apply when no --log-level is given.
    // CLI --log-level takes precedence, then DEBUG_LEVEL / RUST_LOG, then config.
    let config = cli::load_config(&cli)?;
    let level = cli
        .log_level
        .or_else(|| (config.log_level != LogLevel::Off).then_some(config.log_level));
    gist_preview::debug::init_log_bridge(level);

    log::info!("Starting gist-preview {}", gist_preview::VERSION);

    let code = cli::run(cli.command, config)?;
    if code != 0 {
        // Non-zero exit without an error chain: the failure was already reported.
        std::process::exit(code);
    }
    Ok(())
}
