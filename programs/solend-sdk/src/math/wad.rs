//! Fixed-point values scaled by a WAD (10^18).
//!
//! Reserves and obligations store prices, borrowed amounts and cumulative
//! borrow rates as 128-bit integers holding `value * 10^18`. These are
//! kept in a u192 so that a whole u128 can be widened without loss, and
//! products of two of them are taken in a u256.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use crate::{
    error::LendingError,
    math::{to_human_decimal, HALF_WAD, PERCENT_SCALER, SCALE, WAD},
};
use rust_decimal::Decimal;
use std::{convert::TryFrom, fmt};
use uint::construct_uint;

// U192 with 192 bits consisting of 3 x 64-bit words
construct_uint! {
    pub struct U192(3);
}

// U256 with 256 bits consisting of 4 x 64-bit words
construct_uint! {
    pub struct U256(4);
}

/// Large decimal values, precise to 18 digits
#[derive(Clone, Copy, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Wad(pub U192);

impl Wad {
    /// One
    pub fn one() -> Self {
        Self(Self::wad())
    }

    /// Zero
    pub fn zero() -> Self {
        Self(U192::zero())
    }

    fn wad() -> U192 {
        U192::from(WAD)
    }

    fn half_wad() -> U192 {
        U192::from(HALF_WAD)
    }

    /// Create scaled decimal from percent value
    pub fn from_percent(percent: u8) -> Self {
        Self(U192::from(percent as u64 * PERCENT_SCALER))
    }

    /// Return raw scaled value if it fits within u128
    #[allow(clippy::wrong_self_convention)]
    pub fn to_scaled_val(&self) -> Result<u128, LendingError> {
        u128::try_from(self.0).map_err(|_| LendingError::MathOverflow)
    }

    /// Create decimal from scaled value
    pub fn from_scaled_val(scaled_val: u128) -> Self {
        Self(U192::from(scaled_val))
    }

    /// Whether the scaled value is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round scaled decimal to u64
    pub fn try_round_u64(&self) -> Result<u64, LendingError> {
        let rounded_val = Self::half_wad()
            .checked_add(self.0)
            .ok_or(LendingError::MathOverflow)?
            .checked_div(Self::wad())
            .ok_or(LendingError::MathOverflow)?;
        u64::try_from(rounded_val).map_err(|_| LendingError::MathOverflow)
    }

    /// Integer part, truncating the fraction the way the program does
    /// when it divides a wad amount by `WAD`
    pub fn try_floor_u128(&self) -> Result<u128, LendingError> {
        let floor_val = self
            .0
            .checked_div(Self::wad())
            .ok_or(LendingError::MathOverflow)?;
        u128::try_from(floor_val).map_err(|_| LendingError::MathOverflow)
    }

    /// Exact human-readable value, `scaled / 10^18`
    pub fn to_decimal(&self) -> Result<Decimal, LendingError> {
        to_human_decimal(self.to_scaled_val()?, SCALE as u32)
    }

    /// Carry a wad amount recorded at `recorded_rate` forward to
    /// `current_rate` and return whole native units:
    /// `self * current_rate / recorded_rate / WAD`, truncating.
    pub fn try_rebase_floor(
        &self,
        current_rate: Wad,
        recorded_rate: Wad,
    ) -> Result<u128, LendingError> {
        if recorded_rate.is_zero() {
            return Err(LendingError::UndefinedRatio);
        }
        let rebased = U256::from(self.to_scaled_val()?)
            .checked_mul(U256::from(current_rate.to_scaled_val()?))
            .ok_or(LendingError::MathOverflow)?
            .checked_div(U256::from(recorded_rate.to_scaled_val()?))
            .ok_or(LendingError::MathOverflow)?
            .checked_div(U256::from(WAD))
            .ok_or(LendingError::MathOverflow)?;
        u128::try_from(rebased).map_err(|_| LendingError::MathOverflow)
    }
}

impl fmt::Display for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scaled_val = self.0.to_string();
        if scaled_val.len() <= SCALE {
            scaled_val.insert_str(0, &"0".repeat(SCALE - scaled_val.len()));
            scaled_val.insert_str(0, "0.");
        } else {
            scaled_val.insert(scaled_val.len() - SCALE, '.');
        }
        f.write_str(&scaled_val)
    }
}

impl fmt::Debug for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<u64> for Wad {
    fn from(val: u64) -> Self {
        Self(Self::wad() * U192::from(val))
    }
}
