/// Scale of precision
pub const SCALE: usize = 18;

/// Identity
pub const WAD: u64 = 1_000_000_000_000_000_000;

/// Half of identity
pub const HALF_WAD: u64 = 500_000_000_000_000_000;

/// Scale for percentages
pub const PERCENT_SCALER: u64 = 10_000_000_000_000_000;

/// Number of slots per year: 2 slots per second
pub const SLOTS_PER_YEAR: u64 = 63_072_000;

/// Collateral tokens minted per liquidity token while a reserve is empty
pub const INITIAL_COLLATERAL_RATIO: u64 = 1;

/// Largest number of fractional digits a human decimal can hold
pub const MAX_HUMAN_SCALE: u32 = 28;
