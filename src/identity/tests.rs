#[cfg(test)]
mod tests {
    use crate::error::IdentityError;
    use crate::identity::eeprom::{EepromDevice, MemoryEeprom};
    use crate::identity::record::{decode, read_identity, read_mac, MacAddress};

    const MAC: [u8; 6] = [0x00, 0x11, 0x22, 0x3A, 0x7B, 0x01];
    const UUID: [u8; 16] = [
        0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02, 0x03,
        0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
    ];

    fn programmed_board(revision: u16) -> MemoryEeprom {
        let mut eeprom = MemoryEeprom::new();
        eeprom.program(EepromDevice::A, 0x00, &7u16.to_le_bytes());
        eeprom.program(EepromDevice::A, 0x02, &revision.to_le_bytes());
        eeprom.program(EepromDevice::A, 0x04, &1_500_000_000u64.to_le_bytes());
        eeprom.program(EepromDevice::B, 0x80, &UUID);
        eeprom.program(EepromDevice::B, 0x9A, &MAC);
        eeprom
    }

    #[test]
    fn test_read_identity_fields() {
        let record = read_identity(&programmed_board(4)).unwrap();
        assert_eq!(record.mac, MacAddress(MAC));
        assert_eq!(record.uuid.0, UUID);
        assert_eq!(record.protocol, 7);
        assert_eq!(record.revision, 4);
        assert_eq!(record.tested_at, 1_500_000_000);
    }

    #[test]
    fn test_sentinel_revisions_rejected() {
        for rev in [0x0302u16, 0xFFFF] {
            // Other fields must not matter
            let mut eeprom = programmed_board(rev);
            eeprom.program(EepromDevice::A, 0x00, &[0xFF, 0xFF]);
            match decode(&eeprom) {
                Err(IdentityError::UnknownRevision(r)) => assert_eq!(r, rev),
                other => panic!("Expected UnknownRevision for 0x{:04X}, got {:?}", rev, other),
            }
        }
    }

    #[test]
    fn test_erased_eeprom_is_unknown_revision() {
        let mut eeprom = MemoryEeprom::new()
            .with_image(EepromDevice::A, vec![0xFF; 256])
            .with_image(EepromDevice::B, vec![0xFF; 256]);
        eeprom.program(EepromDevice::B, 0x9A, &MAC);
        assert!(matches!(decode(&eeprom), Err(IdentityError::UnknownRevision(0xFFFF))));
    }

    #[test]
    fn test_revision_beyond_table() {
        assert!(matches!(
            decode(&programmed_board(9)),
            Err(IdentityError::RevisionOutOfRange { revision: 9, .. })
        ));
    }

    #[test]
    fn test_model_strings_match_table() {
        let expected = [
            (0, "Model: r0, RAM 512MB, Flash 512MB"),
            (1, "Model: r1, RAM 512MB, Flash 512MB"),
            (2, "Model: r2, RAM 128MB, Flash 128MB"),
            (3, "Model: r3, RAM 128MB, Flash 128MB"),
            (4, "Model: r4, RAM 256MB, Flash 512MB"),
        ];
        for (rev, model) in expected {
            let identity = decode(&programmed_board(rev)).unwrap();
            assert_eq!(identity.model_string(), model);
            assert_eq!(identity.revision_tag(), format!("r{}", rev));
        }
    }

    #[test]
    fn test_report_layout() {
        let identity = decode(&programmed_board(4)).unwrap();
        assert_eq!(identity.product_code(), "DBB256R512F-R4");

        let report = identity.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Code:      DBB256R512F-R4");
        assert_eq!(lines[1], "Revision:  4");
        assert_eq!(lines[2], "RAM:       256MB");
        assert_eq!(lines[3], "Flash:     512MB");
        assert_eq!(lines[4], "Protocol:  7");
        assert_eq!(lines[5], "Tested on: 1500000000 (Unix epoch time)");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "MAC:       00:11:22:3A:7B:01");
        assert_eq!(lines[8], "UUID:      DE:AD:BE:EF:00:01:02:03:04:05:06:07:08:09:0A:0B");
    }

    #[test]
    fn test_short_mac_read_fails() {
        // Device B ends in the middle of the MAC field
        let eeprom = MemoryEeprom::new().with_image(EepromDevice::B, vec![0u8; 0x9C]);
        match read_mac(&eeprom) {
            Err(IdentityError::ReadFailure { field, detail }) => {
                assert_eq!(field, "mac");
                assert!(detail.contains("2/6"), "unexpected detail: {}", detail);
            }
            other => panic!("Expected ReadFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_device_fails_read() {
        let mut eeprom = MemoryEeprom::new();
        eeprom.program(EepromDevice::B, 0x80, &UUID);
        eeprom.program(EepromDevice::B, 0x9A, &MAC);
        match read_identity(&eeprom) {
            Err(IdentityError::ReadFailure { field, .. }) => assert_eq!(field, "protocol"),
            other => panic!("Expected ReadFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_mac_low_bytes() {
        assert_eq!(MacAddress(MAC).low_bytes(), [0x3A, 0x7B, 0x01]);
    }
}
