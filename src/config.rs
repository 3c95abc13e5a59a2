//! Application configuration management.
//!
//! Handles loading and merging configuration from multiple sources:
//! - Command-line arguments (highest priority)
//! - TOML configuration file, named explicitly, through the environment, or discovered
//! - Default values from the option registry (lowest priority)

mod app;
mod channel;
mod discovery;
mod error;
mod fields;
mod file;
mod forwarding;
mod interface;
mod overlay;
mod resolver;
pub mod schema;
mod security;
mod source;

pub use app::Configuration;
pub use channel::ChannelConfig;
pub use discovery::{default_candidates, discover, CONFIG_FILE_NAME};
pub use error::ConfigError;
pub use file::{read_config_file, FileValues};
pub use forwarding::ForwardingConfig;
pub use interface::InterfaceConfig;
pub use overlay::Overlay;
pub use resolver::{Resolution, Resolver};
pub use schema::{DefaultValue, OptionDescriptor, OptionGroup, ValueKind, REGISTRY};
pub use security::{CertificateValidationScript, CredentialMaterial, SecurityConfig};
pub use source::{RawOptionValue, RawValue, RawValues, Tier};

/// Environment variable naming the configuration file when `-c` is absent.
pub const CONFIGURATION_FILE_ENV: &str = "PEERLAN_CONFIGURATION_FILE";
