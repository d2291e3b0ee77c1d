use super::serial::{Serial, SERIAL_LEN};
use crate::codec::{WireDecode, WireEncode};
use crate::error::PacketError;
use std::fmt;
use std::io::{Read, Result, Write};

/// Well-known UDP port of the discovery protocol.
pub const DISCOVERY_PORT: u16 = 13992;

/// Operation code carried in byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Operation {
    Request = 1,
    Reply = 2,
}

impl TryFrom<u8> for Operation {
    type Error = PacketError;

    fn try_from(v: u8) -> std::result::Result<Self, PacketError> {
        match v {
            1 => Ok(Operation::Request),
            2 => Ok(Operation::Reply),
            other => Err(PacketError::UnknownOperation(other)),
        }
    }
}

/// Service being looked for, carried in byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Service {
    Nfs = 1,
    Tftp = 2,
}

impl TryFrom<u8> for Service {
    type Error = PacketError;

    fn try_from(v: u8) -> std::result::Result<Self, PacketError> {
        match v {
            1 => Ok(Service::Nfs),
            2 => Ok(Service::Tftp),
            other => Err(PacketError::UnknownService(other)),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Nfs => write!(f, "nfs"),
            Service::Tftp => write!(f, "tftp"),
        }
    }
}

/// Discovery datagram.
///
/// Layout (36 bytes):
/// - `[0]` operation
/// - `[1]` service id
/// - `[2..4]` reserved, zero on send, ignored on receive
/// - `[4..36]` serial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryPacket {
    pub operation: Operation,
    pub service: Service,
    pub serial: Serial,
}

impl DiscoveryPacket {
    pub const LENGTH: usize = 4 + SERIAL_LEN;

    pub fn request(service: Service, serial: Serial) -> Self {
        DiscoveryPacket { operation: Operation::Request, service, serial }
    }

    pub fn reply(service: Service, serial: Serial) -> Self {
        DiscoveryPacket { operation: Operation::Reply, service, serial }
    }

    pub fn encode(&self) -> [u8; Self::LENGTH] {
        let mut buffer = [0u8; Self::LENGTH];
        buffer[0] = self.operation as u8;
        buffer[1] = self.service as u8;
        // [2..4] reserved
        buffer[4..].copy_from_slice(self.serial.as_bytes());
        buffer
    }

    /// Decode the first 36 bytes of `buffer`; anything beyond is ignored.
    pub fn decode(buffer: &[u8]) -> std::result::Result<Self, PacketError> {
        if buffer.len() < Self::LENGTH {
            return Err(PacketError::Truncated { len: buffer.len() });
        }
        let operation = Operation::try_from(buffer[0])?;
        let service = Service::try_from(buffer[1])?;
        let mut serial = [0u8; SERIAL_LEN];
        serial.copy_from_slice(&buffer[4..Self::LENGTH]);

        Ok(DiscoveryPacket {
            operation,
            service,
            serial: Serial::from_bytes(serial),
        })
    }
}

impl WireEncode for DiscoveryPacket {
    fn encode_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        (self.operation as u8).encode_to(writer)?;
        (self.service as u8).encode_to(writer)?;
        [0u8; 2].encode_to(writer)?;
        self.serial.encode_to(writer)
    }
}

impl WireDecode for DiscoveryPacket {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self> {
        let buf = <[u8; DiscoveryPacket::LENGTH]>::decode_from(reader)?;
        DiscoveryPacket::decode(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
