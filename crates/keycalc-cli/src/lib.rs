//! keycalc CLI library
//!
//! Command tree, configuration, logging setup and the subcommand runners
//! behind the `keycalc` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod logging;
pub mod runner;

pub use commands::{Cli, ColorArg, Commands, KeysArgs, LogFormatArg, OutputArg, RunArgs};
pub use config::{CliConfig, ColorChoice, LogFormat, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
