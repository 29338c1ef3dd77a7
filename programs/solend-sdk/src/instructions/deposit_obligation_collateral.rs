use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Collateral",
    "Destination Collateral",
    "Deposit Reserve",
    "Obligation",
    "Lending Market",
    "Obligation Owner",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::DepositObligationCollateral`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositObligationCollateral {
    pub source_collateral: Pubkey,
    /// Reserve collateral supply
    pub destination_collateral: Pubkey,
    pub deposit_reserve: Pubkey,
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub obligation_owner: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl DepositObligationCollateral {
    pub fn instruction(&self, program_id: &Pubkey, collateral_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_collateral, false),
                AccountMeta::new(self.destination_collateral, false),
                AccountMeta::new_readonly(self.deposit_reserve, false),
                AccountMeta::new(self.obligation, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(self.obligation_owner, true),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::DepositObligationCollateral { collateral_amount }.pack(),
        }
    }
}
