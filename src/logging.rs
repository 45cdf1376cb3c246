//! Logger bootstrap for the binary.
//!
//! Everything at the configured level goes to the log file; warnings and
//! errors are also echoed on stderr. The library itself only uses the `log`
//! macros and never installs a logger.

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;

pub fn init_logging(level: LevelFilter, log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {:?}", log_path))?;

    let config = ConfigBuilder::new()
        .add_filter_allow_str("grumblebug")
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Warn,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, config, file),
    ])
    .context("Logger already initialized")?;

    log::info!("Logging to {} at level {}", log_path.display(), level);
    Ok(())
}
