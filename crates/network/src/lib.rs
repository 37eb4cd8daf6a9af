//! Milight bridge transport layer
//!
//! Commands are fire-and-forget UDP datagrams, the bridge never answers.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn
)]

pub use milight_core as core;
use milight_core::{proto::Command, Result as MilightResult};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub use crate::udp::UdpTransport;

mod udp;

/// Default IP address of the bridge.
pub const DEFAULT_BRIDGE_IP_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 2, 100));
/// Default UDP port of the bridge.
pub const DEFAULT_BRIDGE_PORT: u16 = 8899;
/// Default bridge socket address.
pub const DEFAULT_BRIDGE_ADDRESS: SocketAddr =
    SocketAddr::new(DEFAULT_BRIDGE_IP_ADDRESS, DEFAULT_BRIDGE_PORT);

/// The trait allows to deliver a command to the bridge.
///
/// Sending is a one-way operation: there are no acknowledgments and no retries, a failed
/// send is reported to the caller as is.
pub trait Transport {
    /// Sends a single command.
    fn send(&mut self, command: Command) -> MilightResult<()>;
}

impl<T: ?Sized + Transport> Transport for &mut T {
    fn send(&mut self, command: Command) -> MilightResult<()> {
        T::send(self, command)
    }
}
