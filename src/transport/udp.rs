use super::traits::DiscoveryTransport;
use crate::logging::TRANSPORT;
use log::debug;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{Error, ErrorKind, Result};
use std::net::{SocketAddr, UdpSocket};

/// Non-blocking UDP socket that broadcasts to a fixed destination.
pub struct UdpTransport {
    socket: Option<UdpSocket>,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind to `bind_addr` with `SO_REUSEADDR` and `SO_BROADCAST` set, so the
    /// discovery port can be shared with other listeners on the host.
    pub fn bind(bind_addr: SocketAddr, target: SocketAddr) -> Result<Self> {
        let socket = Socket::new(Domain::for_address(bind_addr), Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        if bind_addr.is_ipv4() {
            socket.set_broadcast(true)?;
        }
        socket.set_nonblocking(true)?;
        socket.bind(&bind_addr.into())?;

        let socket: UdpSocket = socket.into();
        debug!(target: TRANSPORT, "bound {} -> {}", socket.local_addr()?, target);
        Ok(UdpTransport { socket: Some(socket), target })
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket()?.local_addr()
    }

    fn socket(&self) -> Result<&UdpSocket> {
        self.socket
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::NotConnected, "transport closed"))
    }
}

impl DiscoveryTransport for UdpTransport {
    fn send_broadcast(&mut self, data: &[u8]) -> Result<usize> {
        self.socket()?.send_to(data, self.target)
    }

    fn try_receive(&mut self, buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>> {
        match self.socket()?.recv_from(buffer) {
            Ok((len, src)) => Ok(Some((len, src))),
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            debug!(target: TRANSPORT, "released {:?}", socket.local_addr().ok());
        }
    }
}
