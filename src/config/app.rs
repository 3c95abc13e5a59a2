//! Assembly of the final configuration record.
//!
//! Combines the command line, the configuration file and the built-in
//! defaults into a single [`Configuration`] handed to the rest of the node.

use std::path::PathBuf;

use tracing::warn;

use crate::cli::Cli;

use super::channel::ChannelConfig;
use super::error::ConfigError;
use super::fields::Fields;
use super::forwarding::ForwardingConfig;
use super::interface::InterfaceConfig;
use super::resolver::{Resolution, Resolver};
use super::schema::REGISTRY;
use super::security::SecurityConfig;
use super::source::RawValues;

/// Fully resolved, validated configuration.
///
/// Built once at startup and only read afterwards.
#[derive(Debug)]
pub struct Configuration {
    /// Path to the loaded configuration file, if any.
    pub config_file: Option<PathBuf>,
    /// Non-fatal conditions raised while resolving; already logged.
    pub warnings: Vec<ConfigError>,
    pub channel: ChannelConfig,
    pub security: SecurityConfig,
    pub interface: InterfaceConfig,
    pub forwarding: ForwardingConfig,
}

impl Configuration {
    /// Loads and merges configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Command-line arguments
    /// 2. Configuration file (`--configuration_file`, the environment, or discovery)
    /// 3. Built-in defaults
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        Self::load_with(&Resolver::new(), cli)
    }

    /// Like [`Configuration::load`], with a caller-provided resolver.
    pub fn load_with(resolver: &Resolver, cli: Cli) -> Result<Self, ConfigError> {
        let Cli {
            configuration_file,
            options,
            unrecognized,
            ..
        } = cli;

        for warning in &unrecognized {
            warn!("{warning}");
        }

        let Resolution {
            values,
            config_file,
            warnings,
        } = resolver.resolve(configuration_file.as_deref(), options)?;

        let mut configuration = Self::assemble(&values)?;
        configuration.config_file = config_file;
        configuration.warnings = unrecognized;
        configuration.warnings.extend(warnings);
        Ok(configuration)
    }

    /// Types and validates resolved raw values.
    ///
    /// Required options are checked first, in registry order, so the first
    /// missing key is reported before any parse failure.
    pub fn assemble(values: &RawValues) -> Result<Self, ConfigError> {
        if let Some(missing) = REGISTRY
            .iter()
            .find(|descriptor| descriptor.required && values.get(descriptor).is_none())
        {
            return Err(ConfigError::MissingRequiredOption { key: missing.key });
        }

        let fields = Fields::new(values);
        Ok(Self {
            config_file: None,
            warnings: Vec::new(),
            channel: ChannelConfig::build(&fields)?,
            security: SecurityConfig::build(&fields)?,
            interface: InterfaceConfig::build(&fields)?,
            forwarding: ForwardingConfig::build(&fields)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::cli_test_support::{parse, parse_with_env};
    use crate::config::schema::{
        HELLO_TIMEOUT, IPV4_ADDRESS_PREFIX_LENGTH, LISTEN_ON, SIGNATURE_CERTIFICATE_FILE,
        SIGNATURE_PRIVATE_KEY_FILE,
    };
    use crate::config::source::{RawValue, Tier};
    use crate::config::Overlay;
    use crate::parsers::credentials_test_support::{write_certificate, write_private_key};
    use crate::parsers::RoutingMethod;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        parse(args).expect("parse args")
    }

    fn credentials(dir: &Path) -> (String, String) {
        (
            write_certificate(dir, "node.crt").display().to_string(),
            write_private_key(dir, "node.key").display().to_string(),
        )
    }

    #[test]
    fn app_config_prefers_cli_over_file_values() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());
        let config_path = temp.path().join("peerlan.toml");
        fs::write(
            &config_path,
            format!(
                r#"
[fscp]
listen_on = "10.0.0.1:1000"
hello_timeout = 1500

[security]
signature_certificate_file = "{cert}"
signature_private_key_file = "{key}"

[switch]
routing_method = "hub"
"#
            ),
        )
        .expect("write config");
        let config_arg = config_path.display().to_string();

        let app = Configuration::load_with(
            &Resolver::with_candidates(Vec::new()),
            cli(&[
                "--configuration_file",
                &config_arg,
                "--fscp.listen_on",
                "10.0.0.2:2000",
            ]),
        )
        .expect("load configuration");

        assert_eq!(app.config_file.as_deref(), Some(config_path.as_path()));
        assert_eq!(app.channel.listen_on.to_string(), "10.0.0.2:2000");
        assert_eq!(app.channel.hello_timeout, Duration::from_millis(1500));
        assert_eq!(app.forwarding.routing_method, RoutingMethod::Hub);
    }

    #[test]
    fn missing_signature_certificate_is_reported_by_key() {
        let temp = TempDir::new().expect("temp dir");
        let (_, key) = credentials(temp.path());

        let err = Configuration::load_with(
            &Resolver::with_candidates(vec![temp.path().join("absent.toml")]),
            cli(&["--security.signature_private_key_file", &key]),
        )
        .expect_err("certificate is required");

        assert!(matches!(
            err,
            ConfigError::MissingRequiredOption {
                key: "security.signature_certificate_file"
            }
        ));
        assert_eq!(
            err.to_string(),
            "missing required option 'security.signature_certificate_file'"
        );
    }

    #[test]
    fn missing_explicit_file_aborts_loading() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());
        let missing = temp.path().join("missing.toml").display().to_string();

        let err = Configuration::load_with(
            &Resolver::with_candidates(Vec::new()),
            cli(&[
                "-c",
                &missing,
                "--security.signature_certificate_file",
                &cert,
                "--security.signature_private_key_file",
                &key,
            ]),
        )
        .expect_err("explicit file must be readable");

        assert!(matches!(err, ConfigError::ExplicitFileUnreadable { .. }));
    }

    #[test]
    fn unreadable_file_from_environment_aborts_loading() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());
        let missing = temp.path().join("from-env.toml");
        let discovered = temp.path().join("discovered.toml");
        fs::write(&discovered, "[switch]\nrouting_method = \"hub\"\n").expect("write config");

        let err = Configuration::load_with(
            &Resolver::with_candidates(vec![discovered]),
            parse_with_env(
                Some(&missing.display().to_string()),
                &[
                    "--security.signature_certificate_file",
                    &cert,
                    "--security.signature_private_key_file",
                    &key,
                ],
            )
            .expect("parse args"),
        )
        .expect_err("file named by the environment must be readable");

        assert!(matches!(
            err,
            ConfigError::ExplicitFileUnreadable { ref path, .. } if *path == missing
        ));
    }

    #[test]
    fn empty_environment_value_falls_back_to_discovery() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());
        let discovered = temp.path().join("discovered.toml");
        fs::write(&discovered, "[switch]\nrouting_method = \"hub\"\n").expect("write config");

        let app = Configuration::load_with(
            &Resolver::with_candidates(vec![discovered.clone()]),
            parse_with_env(
                Some(""),
                &[
                    "--security.signature_certificate_file",
                    &cert,
                    "--security.signature_private_key_file",
                    &key,
                ],
            )
            .expect("parse args"),
        )
        .expect("discovered file is used");

        assert_eq!(app.config_file, Some(discovered));
        assert_eq!(app.forwarding.routing_method, RoutingMethod::Hub);
    }

    #[test]
    fn signature_only_configuration_from_command_line() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());

        let app = Configuration::load_with(
            &Resolver::with_candidates(vec![temp.path().join("absent.toml")]),
            cli(&[
                "--security.signature_certificate_file",
                &cert,
                "--security.signature_private_key_file",
                &key,
                "--fscp.contact",
                "a.example.org:12000",
                "9.0.0.2:12000",
            ]),
        )
        .expect("defaults fill the rest");

        assert!(app.config_file.is_none());
        assert!(matches!(
            app.warnings.as_slice(),
            [ConfigError::DiscoveredFileAbsent { .. }]
        ));
        assert!(app.security.encryption_certificate.is_none());
        assert!(app.security.encryption_private_key.is_none());
        assert_eq!(app.channel.contacts.len(), 2);
        assert!(app.interface.enabled);
        assert_eq!(app.forwarding.routing_method, RoutingMethod::Switch);
    }

    #[test]
    fn unknown_command_line_keys_become_warnings() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());

        let app = Configuration::load_with(
            &Resolver::with_candidates(Vec::new()),
            cli(&[
                "--fscp.future_option",
                "42",
                "--security.signature_certificate_file",
                &cert,
                "--security.signature_private_key_file",
                &key,
            ]),
        )
        .expect("unknown keys are not fatal");

        assert!(app.warnings.iter().any(|warning| matches!(
            warning,
            ConfigError::UnrecognizedOptionKey { key, origin: Tier::CommandLine }
                if key == "fscp.future_option"
        )));
        assert!(app.warnings.iter().all(|warning| !warning.is_fatal()));
    }

    #[test]
    fn assemble_checks_required_options_before_parsing() {
        let mut overrides = RawValues::default();
        overrides.insert(&LISTEN_ON, Tier::CommandLine, RawValue::Single("bogus".into()));
        let values = RawValues::defaults().overlay(overrides);

        let err = Configuration::assemble(&values).expect_err("missing credentials");

        assert!(matches!(
            err,
            ConfigError::MissingRequiredOption {
                key: "security.signature_certificate_file"
            }
        ));
    }

    #[test]
    fn assemble_reports_invalid_values() {
        let temp = TempDir::new().expect("temp dir");
        let (cert, key) = credentials(temp.path());
        let mut overrides = RawValues::default();
        overrides.insert(&SIGNATURE_CERTIFICATE_FILE, Tier::File, RawValue::Single(cert));
        overrides.insert(&SIGNATURE_PRIVATE_KEY_FILE, Tier::File, RawValue::Single(key));
        overrides.insert(
            &IPV4_ADDRESS_PREFIX_LENGTH,
            Tier::File,
            RawValue::Single("9.0.0.1/33".into()),
        );
        overrides.insert(&HELLO_TIMEOUT, Tier::File, RawValue::Single("250".into()));
        let values = RawValues::defaults().overlay(overrides);

        let err = Configuration::assemble(&values).expect_err("prefix too long");

        assert!(matches!(
            err,
            ConfigError::InvalidOptionValue {
                key: "tap_adapter.ipv4_address_prefix_length",
                ..
            }
        ));
    }
}
