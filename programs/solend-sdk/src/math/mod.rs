//! Math for the program's fixed-point quantities and their conversion to
//! human-readable decimals

mod scaler;
mod wad;

pub use scaler::*;
pub use wad::*;

use crate::error::LendingError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Significant digits an f64 carries once converted to a decimal
const F64_SIGNIFICANT_DIGITS: u32 = 15;

/// `10^exp` as an integer
pub fn pow10(exp: u32) -> Result<u128, LendingError> {
    const MAX_SAFE_EXPONENT: u32 = 38; // 10^38 is within u128 capacity
    if exp > MAX_SAFE_EXPONENT {
        return Err(LendingError::MathOverflow);
    }
    10u128.checked_pow(exp).ok_or(LendingError::MathOverflow)
}

/// `10^exp` as a decimal, used to normalize native token units
pub fn ten_pow(exp: u8) -> Result<Decimal, LendingError> {
    if exp as u32 > MAX_HUMAN_SCALE {
        return Err(LendingError::MathOverflow);
    }
    Decimal::from_u128(pow10(exp as u32)?).ok_or(LendingError::MathOverflow)
}

/// Divide an integer by `10^scale` without going through floating point.
///
/// The integer and fractional parts are converted separately, so any u128
/// with a scale of at least 10 is representable.
pub fn to_human_decimal(value: u128, scale: u32) -> Result<Decimal, LendingError> {
    if scale > MAX_HUMAN_SCALE {
        return Err(LendingError::MathOverflow);
    }
    let divisor = pow10(scale)?;
    let whole = Decimal::from_u128(value / divisor).ok_or(LendingError::MathOverflow)?;
    let fraction = Decimal::from_i128_with_scale((value % divisor) as i128, scale);
    whole
        .checked_add(fraction)
        .ok_or(LendingError::MathOverflow)
}

/// Compound a per-year rate once per slot:
/// `(1 + apr / SLOTS_PER_YEAR) ^ SLOTS_PER_YEAR - 1`.
///
/// The power is taken in f64. Never returns less than `apr`, since f64
/// cannot resolve tiny per-slot rates.
pub fn compound_apr(apr: Decimal) -> Result<Decimal, LendingError> {
    let slots = SLOTS_PER_YEAR as f64;
    let per_slot = apr.to_f64().ok_or(LendingError::MathOverflow)? / slots;
    let growth = (1f64 + per_slot).powf(slots);
    let growth = Decimal::from_f64(growth)
        .and_then(|growth| growth.round_sf(F64_SIGNIFICANT_DIGITS))
        .ok_or(LendingError::MathOverflow)?;
    let apy = growth
        .checked_sub(Decimal::ONE)
        .ok_or(LendingError::MathOverflow)?;
    Ok(apy.max(apr))
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn human_decimal_divides_exactly() {
        assert_eq!(
            to_human_decimal(246_948_349, 6).unwrap(),
            Decimal::from_str("246.948349").unwrap()
        );
        assert_eq!(to_human_decimal(0, 9).unwrap(), Decimal::ZERO);
        assert_eq!(
            to_human_decimal(1, 28).unwrap(),
            Decimal::from_str("0.0000000000000000000000000001").unwrap()
        );
    }

    #[test]
    fn human_decimal_rejects_large_scale() {
        assert_eq!(to_human_decimal(1, 29), Err(LendingError::MathOverflow));
        assert_eq!(ten_pow(29), Err(LendingError::MathOverflow));
    }

    #[test]
    fn unscaled_value_must_fit() {
        assert_eq!(
            to_human_decimal(u128::MAX, 0),
            Err(LendingError::MathOverflow)
        );
    }

    #[test]
    fn ten_pow_normalizes_decimals() {
        assert_eq!(ten_pow(0).unwrap(), Decimal::ONE);
        assert_eq!(ten_pow(9).unwrap(), Decimal::from(1_000_000_000u64));
    }

    #[test]
    fn zero_rate_does_not_compound() {
        assert_eq!(compound_apr(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn compounding_matches_continuous_limit() {
        // approaches e - 1 for a 100% rate
        let apy = compound_apr(Decimal::ONE).unwrap();
        let expected = Decimal::from_str("1.718281828").unwrap();
        assert!((apy - expected).abs() < Decimal::from_str("0.000001").unwrap());
    }

    proptest! {
        #[test]
        fn compounding_never_lowers_rate(bps in 0u32..=100_000) {
            let apr = Decimal::new(bps as i64, 4);
            let apy = compound_apr(apr)?;
            prop_assert!(apy >= apr);
        }

        #[test]
        fn human_decimal_roundtrips_integer_part(value in any::<u64>(), scale in 0u32..=18) {
            let human = to_human_decimal(value as u128, scale)?;
            prop_assert_eq!(human.trunc(), Decimal::from(value / 10u64.pow(scale)));
        }
    }
}
