//! The option registry.
//!
//! Every recognized option is declared here once, with its group, kind,
//! default and requiredness. The command line, the file reader and the
//! assembly stage all work from these descriptors instead of ad hoc keys.

use std::fmt;

/// Option groups, which double as configuration file sections and as the
/// prefix of command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionGroup {
    /// Secure channel: listening, contacts and handshake timing.
    Fscp,
    Security,
    /// Virtual network interface.
    TapAdapter,
    /// Frame forwarding between peers.
    Switch,
}

impl OptionGroup {
    pub const ALL: [OptionGroup; 4] = [
        OptionGroup::Fscp,
        OptionGroup::Security,
        OptionGroup::TapAdapter,
        OptionGroup::Switch,
    ];

    pub fn section(self) -> &'static str {
        match self {
            OptionGroup::Fscp => "fscp",
            OptionGroup::Security => "security",
            OptionGroup::TapAdapter => "tap_adapter",
            OptionGroup::Switch => "switch",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            OptionGroup::Fscp => "Secure channel options",
            OptionGroup::Security => "Security options",
            OptionGroup::TapAdapter => "Tap adapter options",
            OptionGroup::Switch => "Switch options",
        }
    }

    pub fn from_section(section: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.section() == section)
    }
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// Shape of the raw value an option expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    Integer,
    StringList,
}

impl ValueKind {
    pub fn value_name(self) -> &'static str {
        match self {
            ValueKind::String | ValueKind::StringList => "VALUE",
            ValueKind::Bool => "BOOL",
            ValueKind::Integer => "INTEGER",
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, ValueKind::StringList)
    }

    /// What a configuration file entry of this kind must hold.
    pub fn expected(self) -> &'static str {
        match self {
            ValueKind::String => "a string",
            ValueKind::Bool => "a boolean",
            ValueKind::Integer => "an integer",
            ValueKind::StringList => "a string or an array of strings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// No default; the option stays absent unless a source provides it.
    None,
    Value(&'static str),
    EmptyList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub group: OptionGroup,
    /// Full `group.name` key.
    pub key: &'static str,
    pub kind: ValueKind,
    pub default: DefaultValue,
    pub required: bool,
    pub help: &'static str,
}

impl OptionDescriptor {
    const fn optional(
        group: OptionGroup,
        key: &'static str,
        kind: ValueKind,
        default: DefaultValue,
        help: &'static str,
    ) -> Self {
        Self {
            group,
            key,
            kind,
            default,
            required: false,
            help,
        }
    }

    const fn required(group: OptionGroup, key: &'static str, help: &'static str) -> Self {
        Self {
            group,
            key,
            kind: ValueKind::String,
            default: DefaultValue::None,
            required: true,
            help,
        }
    }

    /// The key without its group prefix.
    pub fn name(&self) -> &'static str {
        self.key
            .split_once('.')
            .map_or(self.key, |(_, name)| name)
    }

    /// Help text with the default or requiredness appended.
    pub fn help_text(&self) -> String {
        match self.default {
            _ if self.required => format!("{} [required]", self.help),
            DefaultValue::Value(value) => format!("{} [default: {value}]", self.help),
            DefaultValue::EmptyList => format!("{} [default: none; repeatable]", self.help),
            DefaultValue::None => self.help.to_string(),
        }
    }
}

use DefaultValue::{EmptyList, Value};
use OptionGroup::{Fscp, Security, Switch, TapAdapter};

pub const HOSTNAME_RESOLUTION_PROTOCOL: OptionDescriptor = OptionDescriptor::optional(
    Fscp,
    "fscp.hostname_resolution_protocol",
    ValueKind::String,
    Value("system_default"),
    "The hostname resolution protocol to use (system_default, ipv4 or ipv6).",
);
pub const LISTEN_ON: OptionDescriptor = OptionDescriptor::optional(
    Fscp,
    "fscp.listen_on",
    ValueKind::String,
    Value("0.0.0.0:12000"),
    "The endpoint to listen on.",
);
pub const HELLO_TIMEOUT: OptionDescriptor = OptionDescriptor::optional(
    Fscp,
    "fscp.hello_timeout",
    ValueKind::Integer,
    Value("3000"),
    "The timeout for HELLO messages, in milliseconds.",
);
pub const CONTACT: OptionDescriptor = OptionDescriptor::optional(
    Fscp,
    "fscp.contact",
    ValueKind::StringList,
    EmptyList,
    "The endpoint of a host to contact.",
);

pub const SIGNATURE_CERTIFICATE_FILE: OptionDescriptor = OptionDescriptor::required(
    Security,
    "security.signature_certificate_file",
    "The certificate file to use for signing.",
);
pub const SIGNATURE_PRIVATE_KEY_FILE: OptionDescriptor = OptionDescriptor::required(
    Security,
    "security.signature_private_key_file",
    "The private key file to use for signing.",
);
pub const ENCRYPTION_CERTIFICATE_FILE: OptionDescriptor = OptionDescriptor::optional(
    Security,
    "security.encryption_certificate_file",
    ValueKind::String,
    DefaultValue::None,
    "The certificate file to use for encryption.",
);
pub const ENCRYPTION_PRIVATE_KEY_FILE: OptionDescriptor = OptionDescriptor::optional(
    Security,
    "security.encryption_private_key_file",
    ValueKind::String,
    DefaultValue::None,
    "The private key file to use for encryption.",
);
pub const CERTIFICATE_VALIDATION_METHOD: OptionDescriptor = OptionDescriptor::optional(
    Security,
    "security.certificate_validation_method",
    ValueKind::String,
    Value("default"),
    "The certificate validation method (default or none).",
);
pub const CERTIFICATE_VALIDATION_SCRIPT: OptionDescriptor = OptionDescriptor::optional(
    Security,
    "security.certificate_validation_script",
    ValueKind::String,
    DefaultValue::None,
    "The certificate validation script to use.",
);
pub const AUTHORITY_CERTIFICATE_FILE: OptionDescriptor = OptionDescriptor::optional(
    Security,
    "security.authority_certificate_file",
    ValueKind::StringList,
    EmptyList,
    "An authority certificate file to trust.",
);

pub const TAP_ADAPTER_ENABLED: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.enabled",
    ValueKind::Bool,
    Value("yes"),
    "Whether to enable the tap adapter.",
);
pub const IPV4_ADDRESS_PREFIX_LENGTH: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.ipv4_address_prefix_length",
    ValueKind::String,
    Value("9.0.0.1/24"),
    "The tap adapter IPv4 address and prefix length (empty to disable).",
);
pub const IPV6_ADDRESS_PREFIX_LENGTH: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.ipv6_address_prefix_length",
    ValueKind::String,
    Value("fe80::1/10"),
    "The tap adapter IPv6 address and prefix length (empty to disable).",
);
pub const ARP_PROXY_ENABLED: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.arp_proxy_enabled",
    ValueKind::Bool,
    Value("no"),
    "Whether to enable the ARP proxy.",
);
pub const ARP_PROXY_FAKE_ETHERNET_ADDRESS: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.arp_proxy_fake_ethernet_address",
    ValueKind::String,
    Value("00:aa:bb:cc:dd:ee"),
    "The ethernet address the ARP proxy answers with.",
);
pub const DHCP_PROXY_ENABLED: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.dhcp_proxy_enabled",
    ValueKind::Bool,
    Value("yes"),
    "Whether to enable the DHCP proxy.",
);
pub const DHCP_SERVER_IPV4_ADDRESS_PREFIX_LENGTH: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.dhcp_server_ipv4_address_prefix_length",
    ValueKind::String,
    Value("9.0.0.0/24"),
    "The DHCP proxy server IPv4 address and prefix length (empty to disable).",
);
pub const DHCP_SERVER_IPV6_ADDRESS_PREFIX_LENGTH: OptionDescriptor = OptionDescriptor::optional(
    TapAdapter,
    "tap_adapter.dhcp_server_ipv6_address_prefix_length",
    ValueKind::String,
    Value("fe80::/10"),
    "The DHCP proxy server IPv6 address and prefix length (empty to disable).",
);

pub const ROUTING_METHOD: OptionDescriptor = OptionDescriptor::optional(
    Switch,
    "switch.routing_method",
    ValueKind::String,
    Value("switch"),
    "The routing method for frames (switch or hub).",
);
pub const RELAY_MODE_ENABLED: OptionDescriptor = OptionDescriptor::optional(
    Switch,
    "switch.relay_mode_enabled",
    ValueKind::Bool,
    Value("no"),
    "Whether to relay frames between peers.",
);

/// Every recognized option, in help and assembly order.
pub static REGISTRY: [OptionDescriptor; 21] = [
    HOSTNAME_RESOLUTION_PROTOCOL,
    LISTEN_ON,
    HELLO_TIMEOUT,
    CONTACT,
    SIGNATURE_CERTIFICATE_FILE,
    SIGNATURE_PRIVATE_KEY_FILE,
    ENCRYPTION_CERTIFICATE_FILE,
    ENCRYPTION_PRIVATE_KEY_FILE,
    CERTIFICATE_VALIDATION_METHOD,
    CERTIFICATE_VALIDATION_SCRIPT,
    AUTHORITY_CERTIFICATE_FILE,
    TAP_ADAPTER_ENABLED,
    IPV4_ADDRESS_PREFIX_LENGTH,
    IPV6_ADDRESS_PREFIX_LENGTH,
    ARP_PROXY_ENABLED,
    ARP_PROXY_FAKE_ETHERNET_ADDRESS,
    DHCP_PROXY_ENABLED,
    DHCP_SERVER_IPV4_ADDRESS_PREFIX_LENGTH,
    DHCP_SERVER_IPV6_ADDRESS_PREFIX_LENGTH,
    ROUTING_METHOD,
    RELAY_MODE_ENABLED,
];

pub fn lookup(key: &str) -> Option<&'static OptionDescriptor> {
    REGISTRY.iter().find(|descriptor| descriptor.key == key)
}

/// Descriptors of one group, in registry order.
pub fn descriptors(group: OptionGroup) -> impl Iterator<Item = &'static OptionDescriptor> {
    REGISTRY
        .iter()
        .filter(move |descriptor| descriptor.group == group)
}
