use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Collateral",
    "Destination Collateral",
    "Withdraw Reserve",
    "Obligation",
    "Lending Market",
    "Lending Market Authority",
    "Obligation Owner",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::WithdrawObligationCollateral`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawObligationCollateral {
    /// Reserve collateral supply
    pub source_collateral: Pubkey,
    pub destination_collateral: Pubkey,
    pub withdraw_reserve: Pubkey,
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub obligation_owner: Pubkey,
}

impl WithdrawObligationCollateral {
    pub fn instruction(&self, program_id: &Pubkey, collateral_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_collateral, false),
                AccountMeta::new(self.destination_collateral, false),
                AccountMeta::new_readonly(self.withdraw_reserve, false),
                AccountMeta::new(self.obligation, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new_readonly(self.obligation_owner, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::WithdrawObligationCollateral { collateral_amount }.pack(),
        }
    }
}
