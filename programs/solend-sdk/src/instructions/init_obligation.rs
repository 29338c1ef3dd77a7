use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Obligation",
    "Lending Market",
    "Obligation Owner",
    "Sysvar Clock",
    "Sysvar Rent",
    "Token Program",
];

/// Accounts for [`LendingInstruction::InitObligation`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitObligation {
    /// Obligation account, uninitialized and rent exempt
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub obligation_owner: Pubkey,
}

impl InitObligation {
    pub fn instruction(&self, program_id: &Pubkey) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.obligation, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(self.obligation_owner, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::InitObligation.pack(),
        }
    }
}
