use std::io::{Read, Result, Write};

// Types with a fixed-width wire representation
pub trait WireEncode {
    fn encode_to<W: Write>(&self, writer: &mut W) -> Result<()>;
}

// Types that can be read back from their wire representation
pub trait WireDecode: Sized {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self>;
}
