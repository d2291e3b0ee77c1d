use super::traits::{WireDecode, WireEncode};
use std::io::{Read, Result, Write};

impl WireEncode for u8 {
    fn encode_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[*self])
    }
}

impl WireDecode for u8 {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}

// Fixed-size byte arrays are written verbatim, no length prefix
impl<const N: usize> WireEncode for [u8; N] {
    fn encode_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self)
    }
}

impl<const N: usize> WireDecode for [u8; N] {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; N];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, ErrorKind};

    #[test]
    fn test_u8_encoding() {
        let mut buf = Vec::new();
        0xA5u8.encode_to(&mut buf).unwrap();
        assert_eq!(buf, vec![0xA5]);
        let mut reader = Cursor::new(buf);
        assert_eq!(u8::decode_from(&mut reader).unwrap(), 0xA5);
    }

    #[test]
    fn test_array_is_verbatim() {
        let data = [1u8, 0, 2, 0];
        let mut buf = Vec::new();
        data.encode_to(&mut buf).unwrap();
        assert_eq!(buf, vec![1, 0, 2, 0]);
    }

    #[test]
    fn test_array_decode_short_input() {
        let mut reader = Cursor::new(vec![1u8, 2, 3]);
        let err = <[u8; 4]>::decode_from(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }
}
