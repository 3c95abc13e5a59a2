//! Configuration errors and warnings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parsers::{CredentialError, ValueError};

use super::source::Tier;

/// Everything that can go wrong while resolving the configuration.
///
/// [`ConfigError::DiscoveredFileAbsent`] and [`ConfigError::UnrecognizedOptionKey`]
/// are warnings: they are logged and collected, never returned as failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required option '{key}'")]
    MissingRequiredOption { key: &'static str },

    #[error("invalid value \"{value}\" for option '{key}': {source}")]
    InvalidOptionValue {
        key: &'static str,
        value: String,
        #[source]
        source: ValueError,
    },

    #[error("unable to read configuration file {}: {source}", .path.display())]
    ExplicitFileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {}: {source}", .path.display())]
    MalformedConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "no configuration file specified and none found; looked up locations were: {}",
        display_paths(.tried)
    )]
    DiscoveredFileAbsent { tried: Vec<PathBuf> },

    #[error("unrecognized option '{key}' (from {origin})")]
    UnrecognizedOptionKey { key: String, origin: Tier },

    #[error("option '{key}': {source}")]
    CredentialLoadError {
        key: &'static str,
        #[source]
        source: CredentialError,
    },
}

impl ConfigError {
    /// Whether this condition aborts startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ConfigError::DiscoveredFileAbsent { .. } | ConfigError::UnrecognizedOptionKey { .. }
        )
    }

    pub(crate) fn invalid(key: &'static str, value: &str, source: ValueError) -> Self {
        ConfigError::InvalidOptionValue {
            key,
            value: value.to_string(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
