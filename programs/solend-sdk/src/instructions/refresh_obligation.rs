use super::*;
use crate::state::Obligation;

pub(crate) const ACCOUNTS: &[&str] = &["Obligation", "Sysvar Clock"];

/// Name prefix of the trailing reserve accounts
pub(crate) const RESERVE_ACCOUNT: &str = "Reserve";

/// Accounts for [`LendingInstruction::RefreshObligation`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshObligation {
    pub obligation: Pubkey,
    /// Deposit reserves followed by borrow reserves, in obligation order
    pub reserves: Vec<Pubkey>,
}

impl RefreshObligation {
    /// Accounts refreshing every reserve the obligation holds
    pub fn from_obligation(obligation_pubkey: Pubkey, obligation: &Obligation) -> Self {
        let deposit_reserves = obligation
            .deposits
            .iter()
            .map(|collateral| collateral.deposit_reserve);
        let borrow_reserves = obligation
            .borrows
            .iter()
            .map(|liquidity| liquidity.borrow_reserve);

        Self {
            obligation: obligation_pubkey,
            reserves: deposit_reserves.chain(borrow_reserves).collect(),
        }
    }

    pub fn instruction(&self, program_id: &Pubkey) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new(self.obligation, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
        ];
        accounts.extend(
            self.reserves
                .iter()
                .map(|reserve| AccountMeta::new_readonly(*reserve, false)),
        );

        Instruction {
            program_id: *program_id,
            accounts,
            data: LendingInstruction::RefreshObligation.pack(),
        }
    }
}
