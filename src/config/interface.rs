use super::error::ConfigError;
use super::fields::Fields;
use super::schema::{
    ARP_PROXY_ENABLED, ARP_PROXY_FAKE_ETHERNET_ADDRESS, DHCP_PROXY_ENABLED,
    DHCP_SERVER_IPV4_ADDRESS_PREFIX_LENGTH, DHCP_SERVER_IPV6_ADDRESS_PREFIX_LENGTH,
    IPV4_ADDRESS_PREFIX_LENGTH, IPV6_ADDRESS_PREFIX_LENGTH, TAP_ADAPTER_ENABLED,
};
use crate::parsers::{EthernetAddress, Ipv4Prefix, Ipv6Prefix};

/// Virtual network interface settings.
///
/// Address fields are `None` when configured as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub enabled: bool,
    pub ipv4_address_prefix_length: Option<Ipv4Prefix>,
    pub ipv6_address_prefix_length: Option<Ipv6Prefix>,
    pub arp_proxy_enabled: bool,
    pub arp_proxy_fake_ethernet_address: EthernetAddress,
    pub dhcp_proxy_enabled: bool,
    pub dhcp_server_ipv4_address_prefix_length: Option<Ipv4Prefix>,
    pub dhcp_server_ipv6_address_prefix_length: Option<Ipv6Prefix>,
}

impl InterfaceConfig {
    pub(crate) fn build(fields: &Fields<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: fields.flag(&TAP_ADAPTER_ENABLED)?,
            ipv4_address_prefix_length: fields.parse_optional(&IPV4_ADDRESS_PREFIX_LENGTH)?,
            ipv6_address_prefix_length: fields.parse_optional(&IPV6_ADDRESS_PREFIX_LENGTH)?,
            arp_proxy_enabled: fields.flag(&ARP_PROXY_ENABLED)?,
            arp_proxy_fake_ethernet_address: fields.parse(&ARP_PROXY_FAKE_ETHERNET_ADDRESS)?,
            dhcp_proxy_enabled: fields.flag(&DHCP_PROXY_ENABLED)?,
            dhcp_server_ipv4_address_prefix_length: fields
                .parse_optional(&DHCP_SERVER_IPV4_ADDRESS_PREFIX_LENGTH)?,
            dhcp_server_ipv6_address_prefix_length: fields
                .parse_optional(&DHCP_SERVER_IPV6_ADDRESS_PREFIX_LENGTH)?,
        })
    }
}
