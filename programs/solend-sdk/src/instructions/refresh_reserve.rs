use super::*;

pub(crate) const ACCOUNTS: &[&str] = &["Reserve", "Reserve Liquidity Oracle", "Sysvar Clock"];

/// Accounts for [`LendingInstruction::RefreshReserve`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshReserve {
    pub reserve: Pubkey,
    /// Price oracle of the reserve liquidity
    pub reserve_liquidity_oracle: Pubkey,
}

impl RefreshReserve {
    pub fn instruction(&self, program_id: &Pubkey) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.reserve, false),
                AccountMeta::new_readonly(self.reserve_liquidity_oracle, false),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
            ],
            data: LendingInstruction::RefreshReserve.pack(),
        }
    }
}
