pub mod app;
pub mod cli;
pub mod config;
pub mod harness;
pub mod logging;
pub mod queue;
