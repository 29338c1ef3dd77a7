use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Reserve",
    "Lending Market",
    "Lending Market Authority",
    "Lending Market Owner",
];

/// Accounts for [`LendingInstruction::UpdateReserveConfig`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateReserveConfig {
    pub reserve: Pubkey,
    pub lending_market: Pubkey,
    pub lending_market_owner: Pubkey,
}

impl UpdateReserveConfig {
    pub fn instruction(&self, program_id: &Pubkey, config: ReserveConfig) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.reserve, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new_readonly(self.lending_market_owner, true),
            ],
            data: LendingInstruction::UpdateReserveConfig { config }.pack(),
        }
    }
}
