//! Command-line interface definitions and argument parsing.
//!
//! The generic options (`--debug`, `--configuration_file`) are declared with
//! [`clap`]'s derive API. One `--group.key` flag per registered option is
//! generated from [`crate::config::REGISTRY`] and collected into the
//! command-line tier of the configuration.

mod args;
mod options;

pub use args::Cli;
pub use options::{command_line_values, option_arg};

#[cfg(test)]
pub(crate) use args::test_support as cli_test_support;
