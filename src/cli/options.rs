use std::ffi::{OsStr, OsString};

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, ArgMatches};

use crate::config::schema::lookup;
use crate::config::{
    ConfigError, OptionDescriptor, OptionGroup, RawValue, RawValues, Tier, ValueKind, REGISTRY,
};

/// Builds the `--group.key` flag for one registered option.
///
/// List options take any number of values and may be repeated; an empty
/// occurrence still counts as given. Boolean options are checked by clap's
/// boolish parser.
pub fn option_arg(descriptor: &'static OptionDescriptor) -> Arg {
    let arg = Arg::new(descriptor.key)
        .long(descriptor.key)
        .value_name(descriptor.kind.value_name())
        .help(descriptor.help_text())
        .help_heading(descriptor.group.heading());

    match descriptor.kind {
        ValueKind::StringList => arg.num_args(0..).action(ArgAction::Append),
        ValueKind::Bool => arg
            .num_args(1)
            .action(ArgAction::Set)
            .value_parser(BoolishValueParser::new()),
        ValueKind::String | ValueKind::Integer => arg.num_args(1).action(ArgAction::Set),
    }
}

/// Collects the registered options present in `matches`.
pub fn command_line_values(matches: &ArgMatches) -> RawValues {
    let mut values = RawValues::default();
    for descriptor in REGISTRY.iter() {
        if matches.value_source(descriptor.key).is_none() {
            continue;
        }

        let value = match descriptor.kind {
            ValueKind::StringList => RawValue::List(strings(matches, descriptor.key).collect()),
            ValueKind::Bool => match matches.get_one::<bool>(descriptor.key) {
                Some(flag) => RawValue::Single(flag.to_string()),
                None => continue,
            },
            ValueKind::String | ValueKind::Integer => {
                match strings(matches, descriptor.key).next_back() {
                    Some(value) => RawValue::Single(value),
                    None => continue,
                }
            }
        };
        values.insert(descriptor, Tier::CommandLine, value);
    }
    values
}

fn strings<'a>(matches: &'a ArgMatches, key: &str) -> impl DoubleEndedIterator<Item = String> + 'a {
    matches
        .get_many::<String>(key)
        .into_iter()
        .flatten()
        .cloned()
}

/// Removes `--group.key` tokens whose group is known but whose key is not,
/// together with their values.
///
/// Values are the following tokens up to the next flag; `-5` counts as a
/// value. Everything after a bare `--` is left alone.
pub(crate) fn strip_unrecognized(args: Vec<OsString>) -> (Vec<OsString>, Vec<ConfigError>) {
    let mut kept = Vec::with_capacity(args.len());
    let mut unrecognized = Vec::new();
    let mut tokens = args.into_iter().peekable();
    kept.extend(tokens.next());

    while let Some(token) = tokens.next() {
        if token.to_str() == Some("--") {
            kept.push(token);
            kept.extend(tokens);
            break;
        }

        let Some(key) = unknown_option_key(&token) else {
            kept.push(token);
            continue;
        };

        if !key.inline_value {
            while tokens.next_if(|next| !looks_like_flag(next)).is_some() {}
        }
        unrecognized.push(ConfigError::UnrecognizedOptionKey {
            key: key.name,
            origin: Tier::CommandLine,
        });
    }

    (kept, unrecognized)
}

struct UnknownKey {
    name: String,
    inline_value: bool,
}

fn looks_like_flag(token: &OsStr) -> bool {
    match token.to_string_lossy().strip_prefix('-') {
        Some(rest) => rest.starts_with('-') || rest.starts_with(|c: char| c.is_ascii_alphabetic()),
        None => false,
    }
}

fn unknown_option_key(token: &OsStr) -> Option<UnknownKey> {
    let flag = token.to_str()?.strip_prefix("--")?;
    let (name, inline_value) = match flag.split_once('=') {
        Some((name, _)) => (name, true),
        None => (flag, false),
    };
    let (section, _) = name.split_once('.')?;
    OptionGroup::from_section(section)?;

    lookup(name).is_none().then(|| UnknownKey {
        name: name.to_string(),
        inline_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{
        AUTHORITY_CERTIFICATE_FILE, CONTACT, HELLO_TIMEOUT, RELAY_MODE_ENABLED,
        TAP_ADAPTER_ENABLED,
    };
    use clap::Command;

    fn command() -> Command {
        Command::new("peerlan").args(REGISTRY.iter().map(option_arg))
    }

    fn values(args: &[&str]) -> RawValues {
        let matches = command()
            .try_get_matches_from(std::iter::once("peerlan").chain(args.iter().copied()))
            .expect("parse");
        command_line_values(&matches)
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn list_values_accept_several_tokens_and_repetition() {
        let parsed = values(&[
            "--fscp.contact",
            "a.example.org:12000",
            "9.0.0.2:12000",
            "--fscp.contact",
            "[fe80::2]:12000",
        ]);

        assert_eq!(
            parsed.get(&CONTACT).map(|v| &v.value),
            Some(&RawValue::List(vec![
                "a.example.org:12000".into(),
                "9.0.0.2:12000".into(),
                "[fe80::2]:12000".into(),
            ]))
        );
    }

    #[test]
    fn bare_list_flag_is_an_explicit_empty_list() {
        let parsed = values(&["--security.authority_certificate_file"]);

        assert_eq!(
            parsed.get(&AUTHORITY_CERTIFICATE_FILE).map(|v| &v.value),
            Some(&RawValue::List(Vec::new()))
        );
    }

    #[test]
    fn absent_flags_contribute_nothing() {
        let parsed = values(&["--fscp.hello_timeout", "250"]);

        assert_eq!(parsed.len(), 1);
        assert_eq!(
            parsed.get(&HELLO_TIMEOUT).map(|v| &v.value),
            Some(&RawValue::Single("250".into()))
        );
        assert!(parsed.get(&CONTACT).is_none());
    }

    #[test]
    fn scalar_flags_take_exactly_one_value() {
        let err = command()
            .try_get_matches_from(["peerlan", "--fscp.listen_on"])
            .expect_err("value required");

        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn boolean_flags_accept_boolish_spellings() {
        let parsed = values(&["--tap_adapter.enabled", "off", "--switch.relay_mode_enabled=Y"]);

        assert_eq!(
            parsed.get(&TAP_ADAPTER_ENABLED).map(|v| &v.value),
            Some(&RawValue::Single("false".into()))
        );
        assert_eq!(
            parsed.get(&RELAY_MODE_ENABLED).map(|v| &v.value),
            Some(&RawValue::Single("true".into()))
        );
    }

    #[test]
    fn boolean_flags_reject_other_values() {
        let err = command()
            .try_get_matches_from(["peerlan", "--tap_adapter.enabled", "sometimes"])
            .expect_err("not a boolean");

        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn strip_drops_dash_prefixed_values_of_unknown_keys() {
        let (kept, unrecognized) = strip_unrecognized(os(&[
            "peerlan",
            "--fscp.future_option",
            "-5",
            "-d",
            "--fscp.other_option",
            "--fscp.listen_on",
            "1.2.3.4:5",
        ]));

        assert_eq!(kept, os(&["peerlan", "-d", "--fscp.listen_on", "1.2.3.4:5"]));
        assert_eq!(unrecognized.len(), 2);
    }

    #[test]
    fn strip_drops_unknown_keys_with_their_values() {
        let (kept, unrecognized) = strip_unrecognized(os(&[
            "peerlan",
            "--switch.mode",
            "fast",
            "--switch.routing_method",
            "hub",
            "--tap_adapter.mtu=1400",
            "-d",
        ]));

        assert_eq!(
            kept,
            os(&["peerlan", "--switch.routing_method", "hub", "-d"])
        );
        let keys: Vec<String> = unrecognized.iter().map(ToString::to_string).collect();
        assert_eq!(
            keys,
            vec![
                "unrecognized option 'switch.mode' (from command line)",
                "unrecognized option 'tap_adapter.mtu' (from command line)",
            ]
        );
    }

    #[test]
    fn strip_leaves_other_flags_and_trailing_arguments() {
        let args = os(&["peerlan", "--other.key", "--", "--fscp.unknown"]);

        let (kept, unrecognized) = strip_unrecognized(args.clone());

        assert_eq!(kept, args);
        assert!(unrecognized.is_empty());
    }
}
