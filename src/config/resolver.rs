//! Merging of command line, configuration file and defaults.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::discovery::{default_candidates, discover};
use super::error::ConfigError;
use super::file::{read_config_file, FileValues};
use super::overlay::Overlay;
use super::source::RawValues;

/// Outcome of source layering: the winning raw value of every option that
/// has one, plus the warnings raised on the way.
#[derive(Debug)]
pub struct Resolution {
    pub values: RawValues,
    /// The configuration file that was read, if any.
    pub config_file: Option<PathBuf>,
    pub warnings: Vec<ConfigError>,
}

/// Resolves raw option values from all sources.
///
/// Precedence (highest to lowest):
/// 1. Command line
/// 2. Configuration file (explicit, or the first discovered candidate)
/// 3. Built-in defaults
#[derive(Debug, Clone)]
pub struct Resolver {
    candidates: Vec<PathBuf>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// A resolver searching the platform's default locations.
    pub fn new() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }

    /// A resolver searching the given locations, in order.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Layers `command_line` over the configuration file and defaults.
    ///
    /// An explicit file that cannot be read is fatal. When no explicit file is
    /// given and no candidate exists, resolution continues without a file tier.
    pub fn resolve(
        &self,
        explicit_file: Option<&Path>,
        command_line: RawValues,
    ) -> Result<Resolution, ConfigError> {
        let mut warnings = Vec::new();

        let config_file = match explicit_file.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => Some(path.to_path_buf()),
            None => match discover(&self.candidates) {
                Some(path) => Some(path.to_path_buf()),
                None => {
                    let warning = ConfigError::DiscoveredFileAbsent {
                        tried: self.candidates.clone(),
                    };
                    warn!("{warning}");
                    warnings.push(warning);
                    None
                }
            },
        };

        let file_values = match &config_file {
            Some(path) => {
                info!("Reading configuration file at: {}", path.display());
                let FileValues {
                    values,
                    warnings: file_warnings,
                } = read_config_file(path)?;
                warnings.extend(file_warnings);
                values
            }
            None => RawValues::default(),
        };

        let values = RawValues::defaults()
            .overlay(file_values)
            .overlay(command_line);

        for (key, value) in values.iter() {
            debug!(option = key, tier = %value.tier, "resolved option");
        }

        Ok(Resolution {
            values,
            config_file,
            warnings,
        })
    }
}
