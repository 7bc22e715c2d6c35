//! Tagstore CLI library
//!
//! Configuration, output formatting and command orchestration behind the
//! `tagstore` binary.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod terminal;

pub use error::{CliError, CliResult, ExitCode};
