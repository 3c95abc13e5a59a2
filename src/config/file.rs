//! The configuration file tier.
//!
//! The file is TOML with one table per option group:
//!
//! ```toml
//! [fscp]
//! listen_on = "0.0.0.0:12000"
//! contact = ["peer.example.org:12000"]
//!
//! [security]
//! signature_certificate_file = "/etc/peerlan/node.crt"
//! ```
//!
//! Each entry must match its option's kind: integer options take integers,
//! boolean options take booleans, list options take arrays of strings. A
//! string is accepted for any kind. Values are kept as raw strings; typing
//! happens at assembly.

use std::fs;
use std::path::Path;

use toml::{Table, Value};
use tracing::warn;

use super::error::ConfigError;
use super::schema::{self, OptionGroup, ValueKind};
use super::source::{RawValue, RawValues, Tier};
use crate::parsers::ValueError;

/// Values read from one configuration file.
#[derive(Debug, Default)]
pub struct FileValues {
    pub values: RawValues,
    pub warnings: Vec<ConfigError>,
}

pub fn read_config_file(path: &Path) -> Result<FileValues, ConfigError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigError::ExplicitFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    let table: Table =
        toml::from_str(&contents).map_err(|source| ConfigError::MalformedConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
    parse_table(table)
}

fn parse_table(table: Table) -> Result<FileValues, ConfigError> {
    let mut file = FileValues::default();

    for (section, entries) in table {
        let (Some(group), Value::Table(entries)) = (OptionGroup::from_section(&section), &entries)
        else {
            file.unrecognized(section);
            continue;
        };

        for (name, value) in entries {
            let key = format!("{}.{name}", group.section());
            let Some(descriptor) = schema::lookup(&key) else {
                file.unrecognized(key);
                continue;
            };
            let raw = to_raw(descriptor.kind, value).map_err(|source| {
                ConfigError::invalid(descriptor.key, &value.to_string(), source)
            })?;
            file.values.insert(descriptor, Tier::File, raw);
        }
    }

    Ok(file)
}

impl FileValues {
    fn unrecognized(&mut self, key: String) {
        let warning = ConfigError::UnrecognizedOptionKey {
            key,
            origin: Tier::File,
        };
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

fn to_raw(kind: ValueKind, value: &Value) -> Result<RawValue, ValueError> {
    match value {
        Value::Array(items) if kind.is_list() => items
            .iter()
            .map(|item| to_scalar(kind, item))
            .collect::<Result<Vec<_>, _>>()
            .map(RawValue::List),
        other => to_scalar(kind, other).map(RawValue::Single),
    }
}

fn to_scalar(kind: ValueKind, value: &Value) -> Result<String, ValueError> {
    match (kind, value) {
        (_, Value::String(text)) => Ok(text.clone()),
        (ValueKind::Integer, Value::Integer(number)) => Ok(number.to_string()),
        (ValueKind::Bool, Value::Boolean(flag)) => Ok(flag.to_string()),
        _ => Err(ValueError::Malformed {
            expected: kind.expected(),
        }),
    }
}
