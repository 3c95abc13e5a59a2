//! # peerlan
//!
//! Configuration resolution for a peer-to-peer virtual LAN node.
//!
//! Option values come from the command line, a TOML configuration file and
//! built-in defaults, in that order of precedence. They are parsed into typed
//! values and assembled into an immutable [`config::Configuration`] covering
//! the secure channel, security credentials, the virtual interface and frame
//! forwarding.
//!
//! ## Usage
//!
//! ```bash
//! # Use the discovered configuration file
//! peerlan
//!
//! # Name the file explicitly and override one option
//! peerlan -c /etc/peerlan/peerlan.toml --fscp.listen_on 0.0.0.0:12001
//! ```

pub mod cli;
pub mod config;
pub mod parsers;
