//! CLI module containing argument parsing and related functionality

pub mod args;
pub mod memory_parser;

pub use args::Args;
