use super::error::ConfigError;
use super::fields::Fields;
use super::schema::{RELAY_MODE_ENABLED, ROUTING_METHOD};
use crate::parsers::RoutingMethod;

/// Frame forwarding settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingConfig {
    pub routing_method: RoutingMethod,
    pub relay_mode_enabled: bool,
}

impl ForwardingConfig {
    pub(crate) fn build(fields: &Fields<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            routing_method: fields.parse(&ROUTING_METHOD)?,
            relay_mode_enabled: fields.flag(&RELAY_MODE_ENABLED)?,
        })
    }
}
