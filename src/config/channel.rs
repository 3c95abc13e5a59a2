use std::time::Duration;

use super::error::ConfigError;
use super::fields::Fields;
use super::schema::{CONTACT, HELLO_TIMEOUT, HOSTNAME_RESOLUTION_PROTOCOL, LISTEN_ON};
use crate::parsers::{parse_milliseconds, Endpoint, HostnameResolutionProtocol};

/// Secure channel settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub listen_on: Endpoint,
    pub hostname_resolution_protocol: HostnameResolutionProtocol,
    pub hello_timeout: Duration,
    /// Peers to contact at startup, in the order given.
    pub contacts: Vec<Endpoint>,
}

impl ChannelConfig {
    pub(crate) fn build(fields: &Fields<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            hostname_resolution_protocol: fields.parse(&HOSTNAME_RESOLUTION_PROTOCOL)?,
            listen_on: fields.parse(&LISTEN_ON)?,
            hello_timeout: fields.parse_with(&HELLO_TIMEOUT, parse_milliseconds)?,
            contacts: fields.parse_list(&CONTACT)?,
        })
    }
}
