//! # peerlan
//!
//! Node entry point: parses the command line, resolves the configuration and
//! announces what will be started.
//!
//! Fatal configuration errors are reported on a single `Error:` line and the
//! process exits with a non-zero status. `--help` and `--version` exit cleanly.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use peerlan::cli::Cli;
use peerlan::config::Configuration;
use peerlan::parsers::Endpoint;

fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let configuration = Configuration::load(cli)?;
    announce_configuration(&configuration);
    Ok(())
}

fn announce_configuration(configuration: &Configuration) {
    let emit = |line: String| tracing::info!("{line}");

    emit("Starting peerlan node.".to_string());
    emit(config_file_line(configuration.config_file.as_deref()));
    emit(format!("Listening on: {}", configuration.channel.listen_on));
    emit(format!(
        "Hostname resolution: {}",
        configuration.channel.hostname_resolution_protocol
    ));
    emit(format!(
        "Hello timeout: {}",
        humantime::format_duration(configuration.channel.hello_timeout)
    ));
    emit(contacts_line(&configuration.channel.contacts));
    emit(format!(
        "Signature certificate: {}",
        configuration.security.signature.certificate.path().display()
    ));
    emit(format!(
        "Encryption credential: {}",
        if configuration.security.encryption().is_some() {
            "configured"
        } else {
            "none"
        }
    ));
    emit(format!(
        "Trusted authorities: {}",
        configuration.security.authority_certificates.len()
    ));
    emit(format!(
        "Tap adapter: {}",
        enabled_label(configuration.interface.enabled)
    ));
    emit(format!(
        "Routing method: {} (relay mode {})",
        configuration.forwarding.routing_method,
        enabled_label(configuration.forwarding.relay_mode_enabled)
    ));
    if !configuration.warnings.is_empty() {
        emit(format!(
            "Configuration loaded with {} warning(s).",
            configuration.warnings.len()
        ));
    }
}

fn config_file_line(config_file: Option<&Path>) -> String {
    match config_file {
        Some(path) => format!("Config file: {}", path.display()),
        None => "Config file: none (using command line and defaults)".to_string(),
    }
}

fn contacts_line(contacts: &[Endpoint]) -> String {
    if contacts.is_empty() {
        return "Contacts: none".to_string();
    }
    let listed = contacts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Contacts ({}): {listed}", contacts.len())
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Fails only when a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_file_line_reports_path_or_fallback() {
        let path = PathBuf::from("/etc/peerlan/peerlan.toml");

        assert_eq!(
            config_file_line(Some(path.as_path())),
            "Config file: /etc/peerlan/peerlan.toml"
        );
        assert_eq!(
            config_file_line(None),
            "Config file: none (using command line and defaults)"
        );
    }

    #[test]
    fn contacts_line_lists_endpoints() {
        let contacts: Vec<Endpoint> = ["a.example.org:12000", "[fe80::2]:12000"]
            .iter()
            .map(|raw| raw.parse().expect("endpoint"))
            .collect();

        assert_eq!(contacts_line(&[]), "Contacts: none");
        assert_eq!(
            contacts_line(&contacts),
            "Contacts (2): a.example.org:12000, [fe80::2]:12000"
        );
    }

    #[test]
    fn enabled_label_is_human_readable() {
        assert_eq!(enabled_label(true), "enabled");
        assert_eq!(enabled_label(false), "disabled");
    }

    #[test]
    fn init_tracing_can_be_called_twice() {
        init_tracing(false);
        init_tracing(true);
    }
}
