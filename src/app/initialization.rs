//! Application initialization and configuration

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use std::io::IsTerminal;
use std::str::FromStr;

use crate::cli::memory_parser::parse_memory_size;
use crate::queue::QueueConfig;
use crate::{cli, config, logging};

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        debug!("Loading configuration from explicit file: {}", config_file.display());
        config::ConfigManager::load_from_file(config_file.clone())?
    } else {
        config::ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        match config.get_log_level("base", "console-level") {
            Ok(Some(level)) => level,
            Ok(None) => LevelFilter::Warn,
            Err(e) => {
                debug!("Invalid console-level in config, using default: {}", e);
                LevelFilter::Warn
            }
        }
    };

    let format = if args.log_format != "text" {
        logging::LogFormat::from_str(&args.log_format).map_err(|e| anyhow::anyhow!(e))?
    } else {
        config
            .get_value("base", "log-format")
            .and_then(|format| logging::LogFormat::from_str(format).ok())
            .unwrap_or(logging::LogFormat::Text)
    };

    let log_file_path = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config.get_log_level("base", "file-log-level").unwrap_or_else(|e| {
            debug!("Invalid file-log-level in config, ignoring: {}", e);
            None
        }),
    };

    let (destination, file_level) = match log_file_path {
        Some(path) => (
            logging::LogDestination::Both(path),
            Some(file_log_level.unwrap_or(console_level)),
        ),
        None => (logging::LogDestination::Console, None),
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Merge queue settings: CLI flags over the `[queue]` config section over defaults
pub fn build_queue_config(args: &cli::Args, config: &config::ConfigManager) -> Result<QueueConfig> {
    let mut queue_config = config.get_queue_config()?;

    if let Some(limit) = &args.memory_limit {
        queue_config.memory_limit = Some(
            parse_memory_size(limit).with_context(|| format!("Invalid --memory-limit: {}", limit))?,
        );
    }
    if let Some(interval) = args.fail_interval {
        queue_config.fail_interval = interval;
    }

    queue_config.validate()?;
    debug!("Queue configuration: {:?}", queue_config);
    Ok(queue_config)
}

/// Colour output unless disabled by flag or config, or stdout is not a terminal
pub fn colour_enabled(args: &cli::Args, config: &config::ConfigManager) -> bool {
    if args.no_color {
        return false;
    }
    match config.get_bool("base", "color") {
        Ok(Some(enabled)) => enabled,
        _ => std::io::stdout().is_terminal(),
    }
}
