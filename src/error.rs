//! Error types shared by the identity decoder, the discovery protocol and the runtime.

use std::io;
use thiserror::Error;

/// Failures while reading or resolving the board identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// An EEPROM field could not be read in full.
    #[error("EEPROM read error: {field} ({detail})")]
    ReadFailure { field: &'static str, detail: String },

    /// Revision is one of the reserved/unprogrammed patterns.
    #[error("unknown revision 0x{0:04X} (board not tested)")]
    UnknownRevision(u16),

    /// Revision is not covered by the model table.
    #[error("revision {revision} out of range (model table has {entries} entries)")]
    RevisionOutOfRange { revision: u16, entries: usize },
}

/// Framing errors of a received discovery datagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("datagram too short: {len} bytes")]
    Truncated { len: usize },

    #[error("unknown operation code {0}")]
    UnknownOperation(u8),

    #[error("unknown service id {0}")]
    UnknownService(u8),
}

/// Outcome of a failed discovery call.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no identity: {0}")]
    NoIdentity(#[source] IdentityError),

    #[error("timed out after {attempts} attempts")]
    TimedOut { attempts: u32 },

    #[error("interrupted")]
    Cancelled,

    #[error("transport error: {0}")]
    TransportError(#[from] io::Error),

    /// Only produced while classifying inbound datagrams; the session loop
    /// discards these and keeps searching.
    #[error("malformed packet: {0}")]
    MalformedPacket(#[from] PacketError),

    #[error("cannot register server address: {0}")]
    Registration(#[source] io::Error),
}

/// Failures of the `identity-info` command.
#[derive(Debug, Error)]
pub enum InfoError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("cannot set {name}: {source}")]
    Environment {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Failures while loading the JSON configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
