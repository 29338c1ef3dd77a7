use super::*;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::clock::Slot;

/// Last update state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastUpdate {
    /// Last slot when updated
    pub slot: Slot,
    /// True when marked stale, false when slot updated
    pub stale: bool,
}

impl LastUpdate {
    /// Number of slots since last update
    pub fn slots_elapsed(&self, slot: Slot) -> Result<u64, LendingError> {
        slot.checked_sub(self.slot).ok_or(LendingError::MathOverflow)
    }

    /// Check if marked stale or last update slot is too long ago
    pub fn is_stale(&self, slot: Slot) -> Result<bool, LendingError> {
        Ok(self.stale || self.slots_elapsed(slot)? >= STALE_AFTER_SLOTS_ELAPSED)
    }
}

/// Number of slots to consider stale after
pub const STALE_AFTER_SLOTS_ELAPSED: u64 = 1;

pub(crate) const LAST_UPDATE_LEN: usize = 9; // 8 + 1

impl Layout for LastUpdate {
    const LEN: usize = LAST_UPDATE_LEN;

    fn unpack_from_slice(src: &[u8]) -> Result<Self, LendingError> {
        let src = array_ref![src, 0, LAST_UPDATE_LEN];
        let (slot, stale) = array_refs![src, 8, 1];
        Ok(Self {
            slot: u64::from_le_bytes(*slot),
            stale: unpack_bool(stale)?,
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), LendingError> {
        let dst = array_mut_ref![dst, 0, LAST_UPDATE_LEN];
        let (slot, stale) = mut_array_refs![dst, 8, 1];
        *slot = self.slot.to_le_bytes();
        pack_bool(self.stale, stale);
        Ok(())
    }
}
