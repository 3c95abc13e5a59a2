//! Network endpoints (`host:port`).

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv6Addr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use super::{HostnameResolutionProtocol, ValueError};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Where to listen or whom to contact.
///
/// Literal addresses are kept as socket addresses; host names are kept
/// verbatim and only resolved on demand through [`Endpoint::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Address(SocketAddr),
    Hostname { host: String, port: u16 },
}

impl Endpoint {
    pub fn host(&self) -> String {
        match self {
            Self::Address(address) => address.ip().to_string(),
            Self::Hostname { host, .. } => host.clone(),
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            Self::Address(address) => address.port(),
            Self::Hostname { port, .. } => *port,
        }
    }

    /// Resolves the endpoint to socket addresses of the requested family.
    pub fn resolve(&self, protocol: HostnameResolutionProtocol) -> io::Result<Vec<SocketAddr>> {
        let candidates: Vec<SocketAddr> = match self {
            Self::Address(address) => vec![*address],
            Self::Hostname { host, port } => (host.as_str(), *port).to_socket_addrs()?.collect(),
        };
        let resolved: Vec<SocketAddr> = candidates
            .into_iter()
            .filter(|address| protocol.matches(address))
            .collect();
        if resolved.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{self} has no {protocol} address"),
            ));
        }
        Ok(resolved)
    }
}

impl FromStr for Endpoint {
    type Err = ValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = value.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or(ValueError::Malformed {
                expected: "[<ipv6 address>]:<port>",
            })?;
            let port = tail.strip_prefix(':').ok_or(ValueError::MissingPort)?;
            let address = host
                .parse::<Ipv6Addr>()
                .map_err(|_| ValueError::AddressFamily { expected: "IPv6" })?;
            return Ok(Self::Address(SocketAddr::new(
                IpAddr::V6(address),
                parse_port(port)?,
            )));
        }

        let (host, port) = value.rsplit_once(':').ok_or(ValueError::MissingPort)?;
        if host.contains(':') {
            return Err(ValueError::Malformed {
                expected: "IPv6 addresses in brackets, e.g. [::1]:12000",
            });
        }
        let port = parse_port(port)?;

        if let Ok(address) = host.parse::<IpAddr>() {
            return Ok(Self::Address(SocketAddr::new(address, port)));
        }
        if !is_valid_hostname(host) {
            return Err(ValueError::InvalidHost);
        }
        Ok(Self::Hostname {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Hostname { host, port } => write!(f, "{host}:{port}"),
        }
    }
}

fn parse_port(value: &str) -> Result<u16, ValueError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::InvalidPort);
    }
    value.parse::<u16>().map_err(|_| ValueError::InvalidPort)
}

fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}
