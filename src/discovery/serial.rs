use crate::codec::{WireDecode, WireEncode};
use crate::identity::MacAddress;
use std::fmt;
use std::io::{Read, Result, Write};

pub const SERIAL_LEN: usize = 32;

/// Board serial as carried in discovery packets: ASCII, left-justified and
/// null-padded to 32 bytes.
///
/// Equality compares all 32 bytes, including anything that follows an
/// embedded null.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Serial([u8; SERIAL_LEN]);

impl Serial {
    pub const fn from_bytes(bytes: [u8; SERIAL_LEN]) -> Self {
        Serial(bytes)
    }

    /// Left-justify `text` into the field. Returns `None` if it does not fit.
    pub fn new(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() > SERIAL_LEN {
            return None;
        }
        let mut field = [0u8; SERIAL_LEN];
        field[..bytes.len()].copy_from_slice(bytes);
        Some(Serial(field))
    }

    /// Six uppercase hex digits of the low three MAC bytes.
    pub fn from_mac(mac: &MacAddress) -> Self {
        let [a, b, c] = mac.low_bytes();
        let text = format!("{:02X}{:02X}{:02X}", a, b, c);
        let mut field = [0u8; SERIAL_LEN];
        field[..text.len()].copy_from_slice(text.as_bytes());
        Serial(field)
    }

    pub fn as_bytes(&self) -> &[u8; SERIAL_LEN] {
        &self.0
    }

    /// Text up to the first null.
    pub fn as_text(&self) -> String {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(SERIAL_LEN);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl fmt::Debug for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Serial({:?})", self.as_text())
    }
}

impl WireEncode for Serial {
    fn encode_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.0.encode_to(writer)
    }
}

impl WireDecode for Serial {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Serial(<[u8; SERIAL_LEN]>::decode_from(reader)?))
    }
}
