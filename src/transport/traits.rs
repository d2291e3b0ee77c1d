use std::io::Result;
use std::net::SocketAddr;

/// Datagram channel used by a discovery session.
/// Object-safe so sessions can run over a real socket or a scripted mock.
pub trait DiscoveryTransport {
    /// Send `data` to the broadcast destination.
    fn send_broadcast(&mut self, data: &[u8]) -> Result<usize>;

    /// Non-blocking receive.
    /// Returns `Ok(None)` when nothing is pending.
    fn try_receive(&mut self, buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>>;

    /// Release the endpoint. Further sends fail; calling twice is a no-op.
    fn close(&mut self);
}

impl<T: DiscoveryTransport + ?Sized> DiscoveryTransport for &mut T {
    fn send_broadcast(&mut self, data: &[u8]) -> Result<usize> {
        (**self).send_broadcast(data)
    }

    fn try_receive(&mut self, buffer: &mut [u8]) -> Result<Option<(usize, SocketAddr)>> {
        (**self).try_receive(buffer)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
