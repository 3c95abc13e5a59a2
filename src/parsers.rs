//! Typed value parsers.
//!
//! Every option reaches the assembly stage as a raw string. The types in this
//! module turn those strings into domain values through [`std::str::FromStr`],
//! failing with a [`ValueError`] that describes what was wrong with the input.
//! Credential loaders are the only parsers touching the filesystem.

mod boolean;
mod choices;
mod credentials;
mod duration;
mod endpoint;
mod ethernet;
mod prefix;

pub use boolean::parse_bool;
pub use choices::{CertificateValidationMethod, HostnameResolutionProtocol, RoutingMethod};
pub use credentials::{
    load_certificate, load_private_key, load_trusted_certificate, Certificate, CertificateRole,
    CredentialError, PrivateKey,
};
#[cfg(test)]
pub(crate) use credentials::test_support as credentials_test_support;
pub use duration::parse_milliseconds;
pub use endpoint::Endpoint;
pub use ethernet::EthernetAddress;
pub use prefix::{Ipv4Prefix, Ipv6Prefix};

use thiserror::Error;

/// Reasons a raw option value can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected one of {}", .expected.join(", "))]
    UnknownChoice { expected: &'static [&'static str] },

    #[error("expected <host>:<port>")]
    MissingPort,

    #[error("port must be an integer between 0 and 65535")]
    InvalidPort,

    #[error("invalid host name")]
    InvalidHost,

    #[error("expected <address>/<prefix length>")]
    MissingPrefixLength,

    #[error("expected an {expected} address")]
    AddressFamily { expected: &'static str },

    #[error("prefix length must be at most {max}")]
    PrefixLengthOutOfRange { max: u8 },

    #[error("expected {expected}")]
    Malformed { expected: &'static str },
}
