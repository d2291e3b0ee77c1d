pub mod codec;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod logging;
pub mod runtime;
pub mod transport;

pub use codec::{WireDecode, WireEncode};
pub use discovery::{CancelToken, DiscoveryPacket, DiscoverySession, Serial, Service, SessionState};
pub use error::{ConfigError, DiscoveryError, IdentityError, InfoError, PacketError};
pub use identity::{BoardIdentity, EepromDevice, EepromReader, FileEeprom, MemoryEeprom};
pub use runtime::{
    identity_info, BoardConfig, DiscoveryClient, DiscoveryConfig, EepromConfig, EnvStore, Environment, InfoRequest,
    SERVER_IP_VAR,
};
pub use transport::{DiscoveryTransport, UdpTransport};
