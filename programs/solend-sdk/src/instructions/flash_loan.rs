use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Liquidity",
    "Reserve",
    "Flash Loan Fee Receiver",
    "Host Fee Receiver",
    "Lending Market",
    "Lending Market Authority",
    "Token Program",
    "Flash Loan Receiver Program",
];

/// Name prefix of the accounts forwarded to the receiver program
pub(crate) const RECEIVER_ACCOUNT: &str = "Flash Loan Receiver Account";

/// Accounts for [`LendingInstruction::FlashLoan`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashLoan {
    /// Reserve liquidity supply
    pub source_liquidity: Pubkey,
    pub destination_liquidity: Pubkey,
    pub reserve: Pubkey,
    pub flash_loan_fee_receiver: Pubkey,
    pub host_fee_receiver: Pubkey,
    pub lending_market: Pubkey,
    /// Program invoked with the borrowed liquidity
    pub flash_loan_receiver_program_id: Pubkey,
    /// Passed through to the receiver program
    pub flash_loan_receiver_accounts: Vec<AccountMeta>,
}

impl FlashLoan {
    pub fn instruction(&self, program_id: &Pubkey, amount: u64) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new(self.source_liquidity, false),
            AccountMeta::new(self.destination_liquidity, false),
            AccountMeta::new(self.reserve, false),
            AccountMeta::new(self.flash_loan_fee_receiver, false),
            AccountMeta::new(self.host_fee_receiver, false),
            AccountMeta::new_readonly(self.lending_market, false),
            AccountMeta::new_readonly(
                lending_market_authority(&self.lending_market, program_id),
                false,
            ),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(self.flash_loan_receiver_program_id, false),
        ];
        accounts.extend(self.flash_loan_receiver_accounts.iter().cloned());

        Instruction {
            program_id: *program_id,
            accounts,
            data: LendingInstruction::FlashLoan { amount }.pack(),
        }
    }
}
