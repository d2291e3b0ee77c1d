//! # Service Discovery Module
//!
//! Locates the server offering NFS or TFTP on the local network: a
//! serial-tagged request is broadcast over UDP and re-sent once per second
//! until a reply carrying the same serial arrives or the retries run out.
//!
//! ## Key Types
//!
//! - [`DiscoveryPacket`] - 36-byte request/reply datagram
//! - [`Serial`] - 32-byte board serial, compared byte for byte
//! - [`DiscoverySession`] - Retry/timeout state machine for one lookup
//! - [`CancelToken`] - Cooperative interrupt flag

pub mod packet;
pub mod serial;
pub mod session;

pub use packet::*;
pub use serial::*;
pub use session::*;
