//! CIDR-style `address/prefix-length` pairs.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use super::ValueError;

macro_rules! define_prefix {
    ($(#[$meta:meta])* $name:ident, $addr:ty, $variant:ident, $family:literal, $bits:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            address: $addr,
            prefix_length: u8,
        }

        impl $name {
            pub const MAX_PREFIX_LENGTH: u8 = $bits;

            pub fn new(address: $addr, prefix_length: u8) -> Result<Self, ValueError> {
                if prefix_length > Self::MAX_PREFIX_LENGTH {
                    return Err(ValueError::PrefixLengthOutOfRange {
                        max: Self::MAX_PREFIX_LENGTH,
                    });
                }
                Ok(Self {
                    address,
                    prefix_length,
                })
            }

            pub fn address(&self) -> $addr {
                self.address
            }

            pub fn prefix_length(&self) -> u8 {
                self.prefix_length
            }
        }

        impl FromStr for $name {
            type Err = ValueError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let (address, prefix_length) = split_prefix(value)?;
                match address {
                    IpAddr::$variant(address) => Self::new(address, prefix_length),
                    _ => Err(ValueError::AddressFamily { expected: $family }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}/{}", self.address, self.prefix_length)
            }
        }
    };
}

define_prefix!(
    /// An IPv4 address with a prefix length of at most 32.
    Ipv4Prefix,
    Ipv4Addr,
    V4,
    "IPv4",
    32
);
define_prefix!(
    /// An IPv6 address with a prefix length of at most 128.
    Ipv6Prefix,
    Ipv6Addr,
    V6,
    "IPv6",
    128
);

fn split_prefix(value: &str) -> Result<(IpAddr, u8), ValueError> {
    let (address, prefix_length) = value
        .trim()
        .split_once('/')
        .ok_or(ValueError::MissingPrefixLength)?;
    let address = address.parse::<IpAddr>().map_err(|_| ValueError::Malformed {
        expected: "an IP address before the '/'",
    })?;
    if prefix_length.is_empty() || !prefix_length.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::Malformed {
            expected: "a decimal prefix length after the '/'",
        });
    }
    // Anything that does not fit in a u8 is out of range for both families.
    let prefix_length = prefix_length.parse::<u8>().unwrap_or(u8::MAX);
    Ok((address, prefix_length))
}
