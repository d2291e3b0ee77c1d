use crate::error::IdentityError;

/// Revision written by the EEPROM programming magic pattern.
pub const REVISION_MAGIC: u16 = 0x0302;
/// Revision read back from an erased EEPROM.
pub const REVISION_ERASED: u16 = 0xFFFF;

/// Hardware variant of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardModel {
    pub revision: u16,
    pub ram_mb: u16,
    pub flash_mb: u16,
}

/// Known board variants, indexed by revision.
pub const MODELS: [BoardModel; 5] = [
    BoardModel { revision: 0, ram_mb: 512, flash_mb: 512 },
    BoardModel { revision: 1, ram_mb: 512, flash_mb: 512 },
    BoardModel { revision: 2, ram_mb: 128, flash_mb: 128 },
    BoardModel { revision: 3, ram_mb: 128, flash_mb: 128 },
    BoardModel { revision: 4, ram_mb: 256, flash_mb: 512 },
];

pub fn is_sentinel(revision: u16) -> bool {
    revision == REVISION_MAGIC || revision == REVISION_ERASED
}

/// Resolve a revision to its model entry.
///
/// Sentinels are rejected before the bounds check so that an unprogrammed
/// board reports `UnknownRevision` rather than `RevisionOutOfRange`.
pub fn lookup(revision: u16) -> Result<&'static BoardModel, IdentityError> {
    if is_sentinel(revision) {
        return Err(IdentityError::UnknownRevision(revision));
    }
    MODELS
        .get(usize::from(revision))
        .ok_or(IdentityError::RevisionOutOfRange {
            revision,
            entries: MODELS.len(),
        })
}
