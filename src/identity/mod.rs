//! # Board Identity Module
//!
//! Decodes the identity fields burned into the two board EEPROMs and resolves
//! the hardware model from the revision.
//!
//! ## Key Types
//!
//! - [`EepromReader`] - Raw fixed-size reads from a device
//! - [`IdentityRecord`] - Fields as stored (MAC, UUID, protocol, revision, test time)
//! - [`BoardIdentity`] - Validated record plus its [`BoardModel`]
//!
//! ## Example
//!
//! ```ignore
//! let eeprom = FileEeprom::new("/dev/eeprom0", "/dev/eeprom1");
//! let identity = identity::decode(&eeprom)?;
//! println!("{}", identity.model_string());
//! ```

pub mod eeprom;
pub mod model;
pub mod record;
pub mod report;

pub use eeprom::{EepromDevice, EepromReader, FileEeprom, MemoryEeprom};
pub use model::{BoardModel, MODELS};
pub use record::{decode, read_identity, read_mac, BoardIdentity, BoardUuid, IdentityRecord, MacAddress};

mod tests;
