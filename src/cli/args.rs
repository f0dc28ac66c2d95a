use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;
use log::debug;

use super::memory_parser::parse_memory_size;

/// Scripted driver for the linked string queue
#[derive(Parser, Debug)]
#[command(name = "qtest")]
#[command(about = "Run queue commands from a script or stdin and check the results")]
#[command(version)]
pub struct Args {
    /// Command script to run (reads stdin when omitted)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Echo each command before running it
    #[arg(short = 'e', long)]
    pub echo: bool,

    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,

    /// Byte budget for queue nodes and values (supports units: K, M, G)
    #[arg(long = "memory-limit", value_name = "SIZE")]
    pub memory_limit: Option<String>,

    /// Fail every N-th allocation (0 disables)
    #[arg(long = "fail-interval", value_name = "N")]
    pub fail_interval: Option<usize>,

    /// Disable coloured error output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    match args.log_format.to_lowercase().as_str() {
        "text" | "json" => {},
        _ => return Err(anyhow::anyhow!(
            "Invalid log format '{}'. Valid options: text, json", args.log_format
        )),
    }

    if let Some(ref level) = args.log_file_level {
        crate::logging::parse_log_level(level)?;
        if args.log_file.is_none() {
            return Err(anyhow::anyhow!(
                "--log-file-level requires --log-file to be specified"
            ));
        }
    }

    if let Some(ref limit) = args.memory_limit {
        if parse_memory_size(limit)? == 0 {
            return Err(anyhow::anyhow!("--memory-limit must be greater than 0"));
        }
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}
