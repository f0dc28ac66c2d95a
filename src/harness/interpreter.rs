//! Driver command interpreter
//!
//! Runs parsed commands against at most one live queue, checks results
//! and counts every failed check. An absent queue is a valid state: size
//! reports 0, removal fails, reverse and sort do nothing.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info, warn};

use crate::cli::memory_parser::format_memory_size;
use crate::harness::command::{Command, DriverOption, HELP};
use crate::queue::config::MAX_REMOVE_BUFFER;
use crate::queue::{MemoryTracker, QueueConfig, QueueError, StringQueue};

/// Budget usage above which insertions are logged
const MEMORY_WARNING_PERCENT: f64 = 90.0;

/// Whether processing continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Outcome of a whole script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub commands: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

pub struct Interpreter<W: Write> {
    queue: Option<StringQueue>,
    tracker: Arc<MemoryTracker>,
    config: QueueConfig,
    out: W,
    echo: bool,
    colour: bool,
    summary: RunSummary,
}

impl<W: Write> Interpreter<W> {
    pub fn new(config: QueueConfig, out: W) -> Self {
        let tracker = Arc::new(MemoryTracker::with_failure_interval(
            config.memory_limit,
            config.fail_interval,
        ));
        Self {
            queue: None,
            tracker,
            config,
            out,
            echo: false,
            colour: false,
            summary: RunSummary::default(),
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn queue(&self) -> Option<&StringQueue> {
        self.queue.as_ref()
    }

    pub fn tracker(&self) -> &Arc<MemoryTracker> {
        &self.tracker
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every line of `input`, stopping early at `quit`. The queue is
    /// freed (and audited) at the end either way.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<RunSummary> {
        for (number, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read command line {}", number + 1))?;
            if self.execute_line(&line)? == Flow::Quit {
                break;
            }
        }
        if self.queue.is_some() {
            self.execute(Command::Free)?;
        }
        info!(
            "Ran {} commands with {} errors",
            self.summary.commands, self.summary.errors
        );
        Ok(self.summary)
    }

    /// Parse and run one script line
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        if self.echo && !line.trim().is_empty() {
            writeln!(self.out, "cmd> {}", line.trim())?;
        }
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                self.error(&e.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!("Executing {:?}", command);
        self.summary.commands += 1;

        match &command {
            Command::New => self.new_queue()?,
            Command::Free => self.free_queue()?,
            Command::InsertHead { value, count } => self.insert(value, *count, true)?,
            Command::InsertTail { value, count } => self.insert(value, *count, false)?,
            Command::RemoveHead { expected } => self.remove(expected.as_deref(), true)?,
            Command::RemoveHeadQuiet => self.remove(None, false)?,
            Command::Size { repeat } => self.size(*repeat)?,
            Command::Reverse => self.reverse()?,
            Command::Sort => self.sort()?,
            Command::Show => {}
            Command::SetOption(option) => self.set_option(*option)?,
            Command::Help => {
                for (usage, description) in HELP {
                    writeln!(self.out, "  {:<18}| {}", usage, description)?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        if command.shows_queue() {
            self.show()?;
        }
        Ok(Flow::Continue)
    }

    fn new_queue(&mut self) -> Result<()> {
        if self.queue.is_some() {
            self.free_queue()?;
        }
        match StringQueue::with_capacity(self.config.initial_capacity, Arc::clone(&self.tracker)) {
            Ok(queue) => self.queue = Some(queue),
            Err(e) => self.warning(&format!("Queue creation failed: {}", e))?,
        }
        Ok(())
    }

    fn free_queue(&mut self) -> Result<()> {
        if self.queue.take().is_none() {
            return self.warning("Calling free on null queue");
        }
        writeln!(self.out, "q = NULL")?;

        let blocks = self.tracker.allocated_blocks();
        if blocks > 0 {
            let bytes = format_memory_size(self.tracker.allocated_bytes());
            self.error(&format!(
                "Freed queue, but {} blocks ({}) are still allocated",
                blocks, bytes
            ))?;
        }
        Ok(())
    }

    fn insert(&mut self, value: &str, count: usize, at_head: bool) -> Result<()> {
        let Some(queue) = self.queue.as_mut() else {
            return self.warning("Calling insert on null queue");
        };

        for _ in 0..count {
            let result = if at_head {
                queue.insert_head(value)
            } else {
                queue.insert_tail(value)
            };
            if let Err(e) = result {
                return self.warning(&format!("Insertion of {} failed: {}", value, e));
            }
        }
        if self.tracker.exceeds_threshold(MEMORY_WARNING_PERCENT) {
            warn!(
                "Queue memory at {:.1}% of limit",
                self.tracker.usage_percent()
            );
        }
        self.check_structure()
    }

    fn remove(&mut self, expected: Option<&str>, report: bool) -> Result<()> {
        let Some(queue) = self.queue.as_mut() else {
            return self.warning("Calling remove head on null queue");
        };

        let mut buffer = Vec::new();
        if buffer.try_reserve_exact(self.config.remove_buffer).is_err() {
            return self.error(&format!(
                "Could not allocate removal buffer of {} bytes",
                self.config.remove_buffer
            ));
        }
        buffer.resize(self.config.remove_buffer, b'X');
        let copied = match queue.remove_head_into(&mut buffer) {
            Ok(copied) => copied,
            Err(QueueError::EmptyQueue) => {
                return self.warning("Calling remove head on empty queue");
            }
            Err(e) => return self.error(&format!("Removal from queue failed: {}", e)),
        };

        if buffer[copied] != 0 {
            return self.error("Removed value is not terminated");
        }
        let removed = String::from_utf8_lossy(&buffer[..copied]).into_owned();
        if report {
            writeln!(self.out, "Removed {} from queue", removed)?;
        }
        if let Some(expected) = expected {
            if removed != expected {
                self.error(&format!(
                    "Removed value {} != expected value {}",
                    removed, expected
                ))?;
            }
        }
        self.check_structure()
    }

    fn size(&mut self, repeat: usize) -> Result<()> {
        let Some(queue) = self.queue.as_ref() else {
            self.warning("Calling size on null queue")?;
            return writeln!(self.out, "Queue size = 0").map_err(Into::into);
        };

        let size = (0..repeat).map(|_| queue.len()).last().unwrap_or_default();
        let counted = queue.iter().count();
        writeln!(self.out, "Queue size = {}", size)?;
        if size != counted {
            self.error(&format!(
                "Computed queue size as {}, but correct value is {}",
                size, counted
            ))?;
        }
        Ok(())
    }

    fn reverse(&mut self) -> Result<()> {
        let Some(queue) = self.queue.as_mut() else {
            return self.warning("Calling reverse on null queue");
        };
        queue.reverse();
        self.check_structure()
    }

    fn sort(&mut self) -> Result<()> {
        let Some(queue) = self.queue.as_mut() else {
            return self.warning("Calling sort on null queue");
        };
        queue.sort();
        if !queue.is_sorted() {
            self.error("Not sorted in ascending order")?;
        }
        self.check_structure()
    }

    fn set_option(&mut self, option: DriverOption) -> Result<()> {
        match option {
            DriverOption::FailInterval(interval) => self.tracker.set_failure_interval(interval),
            DriverOption::RemoveBuffer(0) => {
                return self.error("Option length must be at least 1");
            }
            DriverOption::RemoveBuffer(size) if size > MAX_REMOVE_BUFFER => {
                return self.error(&format!(
                    "Option length {} exceeds the maximum of {}",
                    size, MAX_REMOVE_BUFFER
                ));
            }
            DriverOption::RemoveBuffer(size) => self.config.remove_buffer = size,
            DriverOption::MaxShow(count) => self.config.max_show = count,
        }
        debug!("Option set: {:?}", option);
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        let Some(queue) = self.queue.as_ref() else {
            return writeln!(self.out, "q = NULL").map_err(Into::into);
        };

        let shown: Vec<&str> = queue.iter().take(self.config.max_show).collect();
        let ellipsis = if queue.len() > shown.len() { " ..." } else { "" };
        writeln!(self.out, "q = [{}{}]", shown.join(" "), ellipsis)?;
        Ok(())
    }

    fn check_structure(&mut self) -> Result<()> {
        let checked = self.queue.as_ref().map(StringQueue::check_invariants);
        if let Some(Err(e)) = checked {
            self.error(&e.to_string())?;
        }
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        let line = format!("Warning: {}", message);
        if self.colour {
            writeln!(self.out, "{}", line.yellow())?;
        } else {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.summary.errors += 1;
        log::error!("{}", message);
        let line = format!("ERROR: {}", message);
        if self.colour {
            writeln!(self.out, "{}", line.red().bold())?;
        } else {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}
