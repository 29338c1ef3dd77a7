use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Liquidity",
    "Repay Reserve",
    "Obligation",
    "Lending Market",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::RepayObligationLiquidity`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepayObligationLiquidity {
    pub source_liquidity: Pubkey,
    /// Reserve liquidity supply
    pub destination_liquidity: Pubkey,
    pub repay_reserve: Pubkey,
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl RepayObligationLiquidity {
    pub fn instruction(&self, program_id: &Pubkey, liquidity_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_liquidity, false),
                AccountMeta::new(self.destination_liquidity, false),
                AccountMeta::new(self.repay_reserve, false),
                AccountMeta::new(self.obligation, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::RepayObligationLiquidity { liquidity_amount }.pack(),
        }
    }
}
