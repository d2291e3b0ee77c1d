use dboard::discovery::Serial;
use dboard::identity::{self, FileEeprom};
use dboard::{DiscoveryClient, DiscoveryConfig, EnvStore, IdentityError};
use std::io::Write;
use tempfile::NamedTempFile;

/// Build the two EEPROM images the way the factory programmer lays them out.
fn images(revision: u16, mac: [u8; 6]) -> (NamedTempFile, NamedTempFile) {
    let mut a = vec![0xFFu8; 256];
    a[0x00..0x02].copy_from_slice(&2u16.to_le_bytes());
    a[0x02..0x04].copy_from_slice(&revision.to_le_bytes());
    a[0x04..0x0C].copy_from_slice(&1_262_304_000u64.to_le_bytes());

    let mut b = vec![0xFFu8; 256];
    b[0x80..0x90].copy_from_slice(&[0x5A; 16]);
    b[0x9A..0xA0].copy_from_slice(&mac);

    let mut fa = NamedTempFile::new().unwrap();
    fa.write_all(&a).unwrap();
    let mut fb = NamedTempFile::new().unwrap();
    fb.write_all(&b).unwrap();
    (fa, fb)
}

#[test]
fn test_revision_4_board() {
    let (a, b) = images(4, [0x00, 0x11, 0x22, 0x3A, 0x7B, 0x01]);
    let eeprom = FileEeprom::new(a.path(), b.path());

    let identity = identity::decode(&eeprom).unwrap();
    assert_eq!(identity.model_string(), "Model: r4, RAM 256MB, Flash 512MB");
    assert_eq!(identity.record.protocol, 2);
    assert_eq!(identity.record.tested_at, 1_262_304_000);

    let client = DiscoveryClient::new(eeprom, EnvStore::in_memory(), DiscoveryConfig::default());
    let serial = client.serial().unwrap();
    assert_eq!(serial, Serial::new("3A7B01").unwrap());
}

#[test]
fn test_unprogrammed_board() {
    let (a, b) = images(0xFFFF, [0xFF; 6]);
    let eeprom = FileEeprom::new(a.path(), b.path());
    let err = identity::decode(&eeprom).unwrap_err();
    assert!(matches!(err, IdentityError::UnknownRevision(0xFFFF)));
    assert_eq!(err.to_string(), "unknown revision 0xFFFF (board not tested)");
}

#[test]
fn test_truncated_image() {
    let (a, b) = images(1, [0, 0, 0, 1, 2, 3]);
    // Device A shorter than the timestamp field
    a.as_file().set_len(0x08).unwrap();
    let eeprom = FileEeprom::new(a.path(), b.path());
    match identity::decode(&eeprom) {
        Err(IdentityError::ReadFailure { field, .. }) => assert_eq!(field, "timestamp"),
        other => panic!("Expected ReadFailure, got {:?}", other),
    }
}
