use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{CommandFactory, FromArgMatches, Parser};

use super::options::{command_line_values, option_arg, strip_unrecognized};
use crate::config::{ConfigError, RawValues, CONFIGURATION_FILE_ENV, REGISTRY};

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "peerlan",
    author,
    version,
    about = "Peer-to-peer virtual LAN node"
)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(
        short = 'd',
        long = "debug",
        help = "Enable debug output. RUST_LOG takes precedence when set."
    )]
    pub debug: bool,

    /// Path to the optional TOML configuration file.
    #[arg(
        short = 'c',
        long = "configuration_file",
        alias = "config",
        env = CONFIGURATION_FILE_ENV,
        value_name = "FILE",
        value_parser = OsStringValueParser::new().map(PathBuf::from),
        help = "Optional. Path to the TOML configuration file; the per-user and system-wide locations are searched when omitted."
    )]
    pub configuration_file: Option<PathBuf>,

    /// Values given through the generated `--group.key` flags.
    #[arg(skip)]
    pub options: RawValues,

    /// `--group.key` flags naming a known group but an unknown key.
    #[arg(skip)]
    pub unrecognized: Vec<ConfigError>,
}

impl Cli {
    /// Parses the process arguments.
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::try_parse_args(std::env::args_os())
    }

    /// Parses `args`, the first of which is the binary name.
    ///
    /// An empty configuration file path, from the flag or the environment,
    /// counts as not given.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let (args, unrecognized) = strip_unrecognized(args.into_iter().map(Into::into).collect());
        let matches = Self::command_with_options().try_get_matches_from(args)?;

        let mut cli = Self::from_arg_matches(&matches)?;
        cli.configuration_file = cli
            .configuration_file
            .filter(|path| !path.as_os_str().is_empty());
        cli.options = command_line_values(&matches);
        cli.unrecognized = unrecognized;
        Ok(cli)
    }

    /// The derived command extended with one flag per registered option.
    pub fn command_with_options() -> clap::Command {
        Self::command().args(REGISTRY.iter().map(option_arg))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{parse, parse_with_env};
    use super::*;
    use crate::config::schema::{CONTACT, LISTEN_ON, TAP_ADAPTER_ENABLED};
    use crate::config::{RawValue, Tier};
    use clap::error::ErrorKind;

    #[test]
    fn generated_command_is_consistent() {
        Cli::command_with_options().debug_assert();
    }

    #[test]
    fn generic_options_are_parsed() {
        let cli = parse(&["-d", "-c", "/tmp/peerlan.toml"]).expect("parse");

        assert!(cli.debug);
        assert_eq!(
            cli.configuration_file,
            Some(PathBuf::from("/tmp/peerlan.toml"))
        );
        assert!(cli.options.is_empty());
        assert!(cli.unrecognized.is_empty());
    }

    #[test]
    fn long_configuration_file_flag_and_alias() {
        let long = parse(&["--configuration_file", "a.toml"]).expect("parse");
        let alias = parse(&["--config", "b.toml"]).expect("parse");

        assert_eq!(long.configuration_file, Some(PathBuf::from("a.toml")));
        assert_eq!(alias.configuration_file, Some(PathBuf::from("b.toml")));
    }

    #[test]
    fn environment_names_the_configuration_file() {
        let cli = parse_with_env(Some("/etc/peerlan/other.toml"), &[]).expect("parse");

        assert_eq!(
            cli.configuration_file,
            Some(PathBuf::from("/etc/peerlan/other.toml"))
        );
    }

    #[test]
    fn flag_overrides_environment() {
        let cli =
            parse_with_env(Some("/etc/peerlan/other.toml"), &["-c", "local.toml"]).expect("parse");

        assert_eq!(cli.configuration_file, Some(PathBuf::from("local.toml")));
    }

    #[test]
    fn empty_configuration_file_counts_as_unset() {
        let from_env = parse_with_env(Some(""), &[]).expect("empty variable is accepted");
        let from_flag = parse(&["-c", ""]).expect("empty flag is accepted");

        assert!(from_env.configuration_file.is_none());
        assert!(from_flag.configuration_file.is_none());
    }

    #[test]
    fn boolean_option_flags_reject_unknown_spellings() {
        let err = parse(&["--tap_adapter.enabled", "maybe"]).expect_err("not a boolean");

        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn option_flags_land_in_the_command_line_tier() {
        let cli = parse(&[
            "--fscp.listen_on",
            "1.2.3.4:5",
            "--tap_adapter.enabled=no",
        ])
        .expect("parse");

        let listen_on = cli.options.get(&LISTEN_ON).expect("listen_on given");
        assert_eq!(listen_on.tier, Tier::CommandLine);
        assert_eq!(listen_on.value, RawValue::Single("1.2.3.4:5".into()));
        assert_eq!(
            cli.options.get(&TAP_ADAPTER_ENABLED).map(|v| &v.value),
            Some(&RawValue::Single("false".into()))
        );
        assert_eq!(cli.options.len(), 2);
    }

    #[test]
    fn help_and_version_are_not_failures() {
        let help = parse(&["--help"]).expect_err("help short-circuits");
        let version = parse(&["-V"]).expect_err("version short-circuits");

        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert_eq!(help.exit_code(), 0);
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
        assert_eq!(version.exit_code(), 0);
    }

    #[test]
    fn help_lists_registered_options_with_defaults() {
        let help = Cli::command_with_options().render_help().to_string();

        assert!(help.contains("--fscp.listen_on"));
        assert!(help.contains("[default: 0.0.0.0:12000]"));
        assert!(help.contains("--security.signature_certificate_file"));
        assert!(help.contains("--switch.routing_method"));
    }

    #[test]
    fn unknown_flags_outside_known_groups_are_usage_errors() {
        let err = parse(&["--telemetry.endpoint", "x"]).expect_err("unknown flag");

        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn unknown_keys_in_known_groups_are_dropped() {
        let cli = parse(&[
            "--fscp.future_option",
            "1",
            "2",
            "--fscp.contact",
            "a.example.org:12000",
        ])
        .expect("parse");

        assert_eq!(
            cli.options.get(&CONTACT).map(|v| &v.value),
            Some(&RawValue::List(vec!["a.example.org:12000".into()]))
        );
        assert_eq!(cli.unrecognized.len(), 1);
        assert_eq!(
            cli.unrecognized[0].to_string(),
            "unrecognized option 'fscp.future_option' (from command line)"
        );
    }
}
