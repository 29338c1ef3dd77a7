//! State types

mod last_update;
mod lending_market;
mod obligation;
mod position;
mod reserve;

pub use last_update::*;
pub use lending_market::*;
pub use obligation::*;
pub use position::*;
pub use reserve::*;

use crate::{error::LendingError, math::Wad};
use log::{debug, warn};
use solana_program::pubkey::{Pubkey, PUBKEY_BYTES};

/// Current version of the program and all new accounts created
pub const PROGRAM_VERSION: u8 = 1;

/// Accounts are created with data zeroed out, so uninitialized state instances
/// will have the version set to 0.
pub const UNINITIALIZED_VERSION: u8 = 0;

/// A record stored at fixed offsets in a buffer of exactly `LEN` bytes
pub trait Layout: Sized {
    /// Length of the packed record
    const LEN: usize;

    /// Decode from a slice whose length was already checked against `LEN`
    fn unpack_from_slice(src: &[u8]) -> Result<Self, LendingError>;

    /// Encode into a slice of exactly `LEN` bytes, zero-filling padding
    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), LendingError>;

    /// Decode a buffer, which must be exactly `LEN` bytes long
    fn unpack(src: &[u8]) -> Result<Self, LendingError> {
        if src.len() != Self::LEN {
            debug!(
                "{} bytes supplied for a {}-byte record",
                src.len(),
                Self::LEN
            );
            return Err(LendingError::SizeMismatch {
                expected: Self::LEN,
                actual: src.len(),
            });
        }
        Self::unpack_from_slice(src)
    }

    /// Encode into a new buffer of `LEN` bytes
    fn pack(&self) -> Result<Vec<u8>, LendingError> {
        let mut dst = vec![0u8; Self::LEN];
        self.pack_into_slice(&mut dst)?;
        Ok(dst)
    }
}

/// A decoded account together with its address
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedAccount<T> {
    /// Account address
    pub pubkey: Pubkey,
    /// Decoded contents
    pub account: T,
}

/// Decode a batch of accounts of the same type.
///
/// Each entry is decoded on its own; a failure is reported in that entry
/// and does not affect the others.
pub fn decode_accounts<T: Layout>(
    accounts: &[(Pubkey, &[u8])],
) -> Vec<KeyedAccount<Result<T, LendingError>>> {
    accounts
        .iter()
        .map(|(pubkey, data)| {
            let account = T::unpack(data);
            if let Err(err) = &account {
                warn!("Skipping account {}: {}", pubkey, err);
            }
            KeyedAccount {
                pubkey: *pubkey,
                account,
            }
        })
        .collect()
}

// Helpers
fn pack_wad(wad: Wad, dst: &mut [u8; 16]) -> Result<(), LendingError> {
    *dst = wad.to_scaled_val()?.to_le_bytes();
    Ok(())
}

fn unpack_wad(src: &[u8; 16]) -> Wad {
    Wad::from_scaled_val(u128::from_le_bytes(*src))
}

fn pack_bool(boolean: bool, dst: &mut [u8; 1]) {
    *dst = (boolean as u8).to_le_bytes()
}

fn unpack_bool(src: &[u8; 1]) -> Result<bool, LendingError> {
    match u8::from_le_bytes(*src) {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(LendingError::InvalidBool(other)),
    }
}

fn pack_pubkey(pubkey: &Pubkey, dst: &mut [u8; PUBKEY_BYTES]) {
    dst.copy_from_slice(pubkey.as_ref());
}
