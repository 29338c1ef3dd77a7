use rust_decimal::Decimal;
use solana_program::pubkey::Pubkey;

/// One deposit or borrow of an obligation, valued against current reserve state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Liquidity mint of the reserve
    pub mint_address: Pubkey,
    /// Amount in native units of the liquidity mint
    pub native_amount: Decimal,
    /// Amount in whole tokens
    pub native_amount_ui: Decimal,
    /// Value in the market's quote currency
    pub amount_usd: Decimal,
}

/// Aggregate health figures of an obligation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObligationStats {
    /// Deposit value weighted by each reserve's loan to value ratio
    pub borrow_limit: Decimal,
    /// Deposit value weighted by each reserve's liquidation threshold
    pub liquidation_threshold: Decimal,
    pub user_total_deposit: Decimal,
    pub user_total_borrow: Decimal,
    /// Borrows over deposits, `None` while nothing is deposited
    pub borrow_utilization: Option<Decimal>,
    pub net_account_value: Decimal,
    /// Number of non-zero deposits and borrows
    pub positions: u32,
}

impl ObligationStats {
    /// Borrows exceed what the deposits may carry before liquidation
    pub fn is_unhealthy(&self) -> bool {
        self.user_total_borrow > self.liquidation_threshold
    }

    /// Quote currency value that can still be borrowed
    pub fn remaining_borrow_value(&self) -> Decimal {
        (self.borrow_limit - self.user_total_borrow).max(Decimal::ZERO)
    }
}

/// Complete valuation of an obligation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionStats {
    /// Deposits, in obligation order
    pub deposits: Vec<Position>,
    /// Borrows, in obligation order
    pub borrows: Vec<Position>,
    pub stats: ObligationStats,
}
