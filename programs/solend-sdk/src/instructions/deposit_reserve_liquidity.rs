use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Collateral",
    "Reserve",
    "Reserve Liquidity Supply",
    "Reserve Collateral Mint",
    "Lending Market",
    "Lending Market Authority",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::DepositReserveLiquidity`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositReserveLiquidity {
    /// Liquidity token account the deposit is taken from
    pub source_liquidity: Pubkey,
    /// Collateral token account the minted collateral is sent to
    pub destination_collateral: Pubkey,
    pub reserve: Pubkey,
    pub reserve_liquidity_supply: Pubkey,
    pub reserve_collateral_mint: Pubkey,
    pub lending_market: Pubkey,
    /// Owner or delegate of the source liquidity, signer
    pub user_transfer_authority: Pubkey,
}

impl DepositReserveLiquidity {
    pub fn instruction(&self, program_id: &Pubkey, liquidity_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_liquidity, false),
                AccountMeta::new(self.destination_collateral, false),
                AccountMeta::new(self.reserve, false),
                AccountMeta::new(self.reserve_liquidity_supply, false),
                AccountMeta::new(self.reserve_collateral_mint, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::DepositReserveLiquidity { liquidity_amount }.pack(),
        }
    }
}
