use anyhow::Result;
use linkq::{app, cli, logging};
use log::error;
use std::process;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Returns whether every check in the script passed
fn run() -> Result<bool> {
    let args = cli::args::parse_args();
    cli::args::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    let queue_config = app::build_queue_config(&args, &config_manager)?;
    let colour = app::colour_enabled(&args, &config_manager);

    let summary = app::run_driver(&args, queue_config, colour)?;
    if !summary.is_success() {
        eprintln!("{} errors in {} commands", summary.errors, summary.commands);
    }
    Ok(summary.is_success())
}
