//! Command line entrypoint for `cucumber-dart`.

use std::io::{self, Write};

use clap::Parser;

use cucumber_dart::cli::{Cli, run};
use cucumber_dart::config::ToolConfig;
use cucumber_dart::error::ToolError;
use cucumber_dart::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ToolConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting cucumber-dart");

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = run(&cli, &config, &mut handle) {
        tracing::error!(error = %format!("{e:#}"), "command failed");
        // `exit` skips destructors.
        let _ = handle.flush();
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<ToolConfig, ToolError> {
    let config = ToolConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level, cli.name_style))
}
