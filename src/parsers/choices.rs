//! Enumerated option values.
//!
//! The variants and their spellings come from clap's [`ValueEnum`] derive;
//! configuration values of either source are matched through it.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use super::ValueError;

/// Adds the [`FromStr`] and [`fmt::Display`] impls the option assembly relies
/// on to a [`ValueEnum`] type. Matching is case-sensitive.
macro_rules! impl_choice {
    ($name:ident, [$($text:literal),+ $(,)?]) => {
        impl $name {
            /// Every accepted spelling, aliases included.
            pub const VARIANTS: &'static [&'static str] = &[$($text),+];
        }

        impl FromStr for $name {
            type Err = ValueError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                <Self as ValueEnum>::from_str(value, false).map_err(|_| {
                    ValueError::UnknownChoice {
                        expected: Self::VARIANTS,
                    }
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.to_possible_value() {
                    Some(value) => f.write_str(value.get_name()),
                    None => Ok(()),
                }
            }
        }
    };
}

/// How peer certificates are checked during the handshake.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateValidationMethod {
    /// Chain validation against the configured authorities.
    #[value(name = "default")]
    Default,
    /// Accept any certificate.
    #[value(name = "none")]
    None,
}

impl_choice!(CertificateValidationMethod, ["default", "none"]);

/// Forwarding policy for frames between connected peers.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingMethod {
    /// Learn addresses and forward selectively.
    #[value(name = "switch")]
    Switch,
    /// Flood every frame to every peer.
    #[value(name = "hub")]
    Hub,
}

impl_choice!(RoutingMethod, ["switch", "hub"]);

/// Address family used when resolving host names.
///
/// `system_default` is accepted as a spelling and maps to [`Self::Ipv4`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostnameResolutionProtocol {
    #[value(name = "ipv4", alias = "system_default")]
    Ipv4,
    #[value(name = "ipv6")]
    Ipv6,
}

impl_choice!(HostnameResolutionProtocol, ["system_default", "ipv4", "ipv6"]);

impl HostnameResolutionProtocol {
    pub fn matches(self, address: &std::net::SocketAddr) -> bool {
        match self {
            Self::Ipv4 => address.is_ipv4(),
            Self::Ipv6 => address.is_ipv6(),
        }
    }
}
