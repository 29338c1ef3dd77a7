use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Collateral",
    "Destination Collateral",
    "Withdraw Reserve",
    "Obligation",
    "Lending Market",
    "Lending Market Authority",
    "Destination Liquidity",
    "Reserve Collateral Mint",
    "Reserve Liquidity Supply",
    "Obligation Owner",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::WithdrawObligationCollateralAndRedeemReserveCollateral`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawObligationCollateralAndRedeemReserveCollateral {
    /// Reserve collateral supply
    pub source_collateral: Pubkey,
    /// User collateral account the withdrawn collateral passes through
    pub destination_collateral: Pubkey,
    pub withdraw_reserve: Pubkey,
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub destination_liquidity: Pubkey,
    pub reserve_collateral_mint: Pubkey,
    pub reserve_liquidity_supply: Pubkey,
    pub obligation_owner: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl WithdrawObligationCollateralAndRedeemReserveCollateral {
    pub fn instruction(&self, program_id: &Pubkey, collateral_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_collateral, false),
                AccountMeta::new(self.destination_collateral, false),
                AccountMeta::new(self.withdraw_reserve, false),
                AccountMeta::new(self.obligation, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new(self.destination_liquidity, false),
                AccountMeta::new(self.reserve_collateral_mint, false),
                AccountMeta::new(self.reserve_liquidity_supply, false),
                AccountMeta::new(self.obligation_owner, true),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::WithdrawObligationCollateralAndRedeemReserveCollateral {
                collateral_amount,
            }
            .pack(),
        }
    }
}
