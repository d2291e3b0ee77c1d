//! # Wire Codec Module
//!
//! Stream traits for the fixed-width records exchanged by the discovery
//! protocol. Everything on the wire is either a single byte or an opaque
//! byte array, so no byte order is involved.
//!
//! ## Key Types
//!
//! - [`WireEncode`] / [`WireDecode`] - Encoding over `std::io::Write` / `Read`

pub mod primitives;
pub mod traits;

pub use traits::{WireDecode, WireEncode};
