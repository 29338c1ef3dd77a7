use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Collateral",
    "Repay Reserve",
    "Repay Reserve Liquidity Supply",
    "Withdraw Reserve",
    "Withdraw Reserve Collateral Supply",
    "Obligation",
    "Lending Market",
    "Lending Market Authority",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::LiquidateObligation`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidateObligation {
    /// Liquidator's liquidity used to repay the borrow
    pub source_liquidity: Pubkey,
    /// Liquidator's account receiving the seized collateral
    pub destination_collateral: Pubkey,
    pub repay_reserve: Pubkey,
    pub repay_reserve_liquidity_supply: Pubkey,
    pub withdraw_reserve: Pubkey,
    pub withdraw_reserve_collateral_supply: Pubkey,
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl LiquidateObligation {
    pub fn instruction(&self, program_id: &Pubkey, liquidity_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_liquidity, false),
                AccountMeta::new(self.destination_collateral, false),
                AccountMeta::new(self.repay_reserve, false),
                AccountMeta::new(self.repay_reserve_liquidity_supply, false),
                AccountMeta::new_readonly(self.withdraw_reserve, false),
                AccountMeta::new(self.withdraw_reserve_collateral_supply, false),
                AccountMeta::new(self.obligation, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::LiquidateObligation { liquidity_amount }.pack(),
        }
    }
}
