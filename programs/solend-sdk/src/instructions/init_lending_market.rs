use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Lending Market",
    "Sysvar Rent",
    "Token Program",
    "Oracle Program",
    "Switchboard Oracle Program",
];

/// Accounts for [`LendingInstruction::InitLendingMarket`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitLendingMarket {
    /// Lending market account, uninitialized and rent exempt
    pub lending_market: Pubkey,
    /// Pyth oracle program id
    pub oracle_program_id: Pubkey,
    /// Switchboard oracle program id
    pub switchboard_oracle_program_id: Pubkey,
}

impl InitLendingMarket {
    pub fn instruction(
        &self,
        program_id: &Pubkey,
        owner: &Pubkey,
        quote_currency: [u8; 32],
    ) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.lending_market, false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(self.oracle_program_id, false),
                AccountMeta::new_readonly(self.switchboard_oracle_program_id, false),
            ],
            data: LendingInstruction::InitLendingMarket {
                owner: *owner,
                quote_currency,
            }
            .pack(),
        }
    }
}
