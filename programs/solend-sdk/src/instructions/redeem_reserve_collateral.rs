use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Collateral",
    "Destination Liquidity",
    "Reserve",
    "Reserve Collateral Mint",
    "Reserve Liquidity Supply",
    "Lending Market",
    "Lending Market Authority",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::RedeemReserveCollateral`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeemReserveCollateral {
    /// Collateral token account the redeemed collateral is burned from
    pub source_collateral: Pubkey,
    /// Liquidity token account that receives the redeemed liquidity
    pub destination_liquidity: Pubkey,
    pub reserve: Pubkey,
    pub reserve_collateral_mint: Pubkey,
    pub reserve_liquidity_supply: Pubkey,
    pub lending_market: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl RedeemReserveCollateral {
    pub fn instruction(&self, program_id: &Pubkey, collateral_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_collateral, false),
                AccountMeta::new(self.destination_liquidity, false),
                AccountMeta::new(self.reserve, false),
                AccountMeta::new(self.reserve_collateral_mint, false),
                AccountMeta::new(self.reserve_liquidity_supply, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::RedeemReserveCollateral { collateral_amount }.pack(),
        }
    }
}
