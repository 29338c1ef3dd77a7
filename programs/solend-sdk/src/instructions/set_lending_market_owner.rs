use super::*;

pub(crate) const ACCOUNTS: &[&str] = &["Lending Market", "Lending Market Owner"];

/// Accounts for [`LendingInstruction::SetLendingMarketOwner`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetLendingMarketOwner {
    pub lending_market: Pubkey,
    /// Current owner, signer
    pub lending_market_owner: Pubkey,
}

impl SetLendingMarketOwner {
    pub fn instruction(&self, program_id: &Pubkey, new_owner: &Pubkey) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.lending_market, false),
                AccountMeta::new_readonly(self.lending_market_owner, true),
            ],
            data: LendingInstruction::SetLendingMarketOwner {
                new_owner: *new_owner,
            }
            .pack(),
        }
    }
}
