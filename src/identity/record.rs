use super::eeprom::{EepromDevice, EepromReader};
use super::model::{self, BoardModel};
use crate::error::IdentityError;
use log::debug;
use std::fmt;

/// Location of one identity field in EEPROM.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub device: EepromDevice,
    pub offset: u64,
    pub size: usize,
}

pub const MAC_FIELD: Field = Field { name: "mac", device: EepromDevice::B, offset: 0x9A, size: 6 };
pub const UUID_FIELD: Field = Field { name: "uuid", device: EepromDevice::B, offset: 0x80, size: 16 };
pub const PROTOCOL_FIELD: Field = Field { name: "protocol", device: EepromDevice::A, offset: 0x00, size: 2 };
pub const REVISION_FIELD: Field = Field { name: "revision", device: EepromDevice::A, offset: 0x02, size: 2 };
pub const TIMESTAMP_FIELD: Field = Field { name: "timestamp", device: EepromDevice::A, offset: 0x04, size: 8 };

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            f.write_str(":")?;
        }
        write!(f, "{:02X}", b)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The device-specific half (NIC part) of the address.
    pub fn low_bytes(&self) -> [u8; 3] {
        [self.0[3], self.0[4], self.0[5]]
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardUuid(pub [u8; 16]);

impl fmt::Display for BoardUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

/// Raw identity fields as stored in EEPROM, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub mac: MacAddress,
    pub uuid: BoardUuid,
    pub protocol: u16,
    pub revision: u16,
    /// Unix seconds of the factory test.
    pub tested_at: u64,
}

/// Identity with its model resolved from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardIdentity {
    pub record: IdentityRecord,
    pub model: BoardModel,
}

/// Read one field with a single transfer. A short read is a failure.
pub fn read_field<E: EepromReader, const N: usize>(eeprom: &E, field: Field) -> Result<[u8; N], IdentityError> {
    debug_assert_eq!(field.size, N);
    let mut buf = [0u8; N];
    match eeprom.read(field.device, field.offset, &mut buf) {
        Ok(n) if n == N => Ok(buf),
        Ok(n) => Err(IdentityError::ReadFailure {
            field: field.name,
            detail: format!("short read {}/{} bytes from {} @ 0x{:02X}", n, N, field.device, field.offset),
        }),
        Err(e) => Err(IdentityError::ReadFailure {
            field: field.name,
            detail: format!("{} @ 0x{:02X}: {}", field.device, field.offset, e),
        }),
    }
}

pub fn read_mac<E: EepromReader>(eeprom: &E) -> Result<MacAddress, IdentityError> {
    read_field::<E, 6>(eeprom, MAC_FIELD).map(MacAddress)
}

/// Read all identity fields. The first failing read aborts.
pub fn read_identity<E: EepromReader>(eeprom: &E) -> Result<IdentityRecord, IdentityError> {
    let mac = read_mac(eeprom)?;
    let uuid = BoardUuid(read_field::<E, 16>(eeprom, UUID_FIELD)?);
    let protocol = u16::from_le_bytes(read_field::<E, 2>(eeprom, PROTOCOL_FIELD)?);
    let revision = u16::from_le_bytes(read_field::<E, 2>(eeprom, REVISION_FIELD)?);
    let tested_at = u64::from_le_bytes(read_field::<E, 8>(eeprom, TIMESTAMP_FIELD)?);

    debug!(target: crate::logging::IDENTITY, "read identity: mac {} revision 0x{:04X} protocol {}", mac, revision, protocol);

    Ok(IdentityRecord { mac, uuid, protocol, revision, tested_at })
}

impl IdentityRecord {
    pub fn resolve(self) -> Result<BoardIdentity, IdentityError> {
        let model = *model::lookup(self.revision)?;
        Ok(BoardIdentity { record: self, model })
    }
}

/// Read and resolve the board identity.
pub fn decode<E: EepromReader>(eeprom: &E) -> Result<BoardIdentity, IdentityError> {
    read_identity(eeprom)?.resolve()
}
