use crate::config::AppConfig;
use color_eyre::eyre::eyre;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

/// Installs the global logger.
///
/// The terminal UI owns stdout and the alternate screen, so interactive
/// runs log to a file. Headless runs log to stderr.
pub fn init_logging(config: &AppConfig, headless: bool) -> color_eyre::eyre::Result<()> {
    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_time_format_rfc3339()
        .build();

    if headless {
        TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto)
            .map_err(|e| eyre!("Failed to install logger: {e}"))?;
        return Ok(());
    }

    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    WriteLogger::init(level, log_config, file)
        .map_err(|e| eyre!("Failed to install logger: {e}"))?;

    Ok(())
}
