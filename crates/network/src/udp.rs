//! Transport implementation on top of the [`std::net::UdpSocket`].

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use log::{trace, warn};

use crate::{
    core::{proto::Command, Error},
    MilightResult, Transport,
};

/// UDP transport to the bridge.
#[derive(Debug)]
pub struct UdpTransport {
    address: SocketAddr,
    socket: UdpSocket,
}

impl UdpTransport {
    /// Opens a socket for sending commands to the bridge with the given address.
    ///
    /// Broadcast is enabled, so the address may be a broadcast one like `255.255.255.255`.
    pub fn open(address: SocketAddr) -> MilightResult<Self> {
        let local_address: SocketAddr = if address.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local_address).map_err(network_error)?;
        if address.is_ipv4() {
            socket.set_broadcast(true).map_err(network_error)?;
        }
        log::debug!("Opened socket for the bridge {address}");
        Ok(Self::new(address, socket))
    }

    /// Creates a transport on top of the already bound socket.
    pub fn new(address: SocketAddr, socket: UdpSocket) -> Self {
        Self { address, socket }
    }

    /// Returns the bridge address.
    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, command: Command) -> MilightResult<()> {
        trace!("Send {command} to {}", self.address);
        self.socket
            .send_to(command.as_ref(), self.address)
            .map_err(network_error)
            .map(drop)
    }
}

fn network_error(err: std::io::Error) -> Error {
    warn!("Bridge socket error: {err}");
    Error::transport(err)
}
