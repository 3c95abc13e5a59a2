use std::fmt;
use std::str::FromStr;

use super::ValueError;

const EXPECTED: &str = "six colon-separated hexadecimal bytes, e.g. 00:aa:bb:cc:dd:ee";

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthernetAddress([u8; 6]);

impl EthernetAddress {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for EthernetAddress {
    type Err = ValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 6];
        let mut parts = value.split(':');
        for byte in bytes.iter_mut() {
            let part = parts
                .next()
                .ok_or(ValueError::Malformed { expected: EXPECTED })?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ValueError::Malformed { expected: EXPECTED });
            }
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| ValueError::Malformed { expected: EXPECTED })?;
        }
        if parts.next().is_some() {
            return Err(ValueError::Malformed { expected: EXPECTED });
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for EthernetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
