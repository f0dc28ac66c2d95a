//! Driver execution

use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufReader};

use crate::cli;
use crate::harness::{Interpreter, RunSummary};
use crate::queue::QueueConfig;

/// Run the command script named by `--file`, or stdin, writing results to stdout
pub fn run_driver(args: &cli::Args, queue_config: QueueConfig, colour: bool) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(queue_config, stdout.lock())
        .with_echo(args.echo)
        .with_colour(colour);

    match &args.file {
        Some(path) => {
            info!("Running commands from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open command file: {}", path.display()))?;
            interpreter.run(BufReader::new(file))
        }
        None => interpreter.run(io::stdin().lock()),
    }
}
