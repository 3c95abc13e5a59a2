use std::ffi::OsStr;

use clap::builder::{BoolishValueParser, TypedValueParser};
use clap::Command;

use super::ValueError;

/// Parses boolean option values with clap's boolish spellings
/// (`true/false`, `yes/no`, `on/off`, `y/n`, `t/f`, `1/0`, any case).
///
/// The command line attaches the same parser to its boolean flags, so file
/// and command-line values accept exactly the same input.
pub fn parse_bool(value: &str) -> Result<bool, ValueError> {
    BoolishValueParser::new()
        .parse_ref(&Command::new("peerlan"), None, OsStr::new(value.trim()))
        .map_err(|_| ValueError::Malformed {
            expected: "a boolean (true/false, yes/no, on/off, 1/0)",
        })
}
