use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Liquidity",
    "Borrow Reserve",
    "Borrow Reserve Liquidity Fee Receiver",
    "Obligation",
    "Lending Market",
    "Lending Market Authority",
    "Obligation Owner",
    "Sysvar Clock",
    "Token Program",
];

pub(crate) const HOST_FEE_RECEIVER: &str = "Host Fee Receiver";

/// Accounts for [`LendingInstruction::BorrowObligationLiquidity`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorrowObligationLiquidity {
    /// Reserve liquidity supply
    pub source_liquidity: Pubkey,
    pub destination_liquidity: Pubkey,
    pub borrow_reserve: Pubkey,
    pub borrow_reserve_liquidity_fee_receiver: Pubkey,
    pub obligation: Pubkey,
    pub lending_market: Pubkey,
    pub obligation_owner: Pubkey,
    /// Receives part of the borrow fee when present
    pub host_fee_receiver: Option<Pubkey>,
}

impl BorrowObligationLiquidity {
    pub fn instruction(&self, program_id: &Pubkey, liquidity_amount: u64) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new(self.source_liquidity, false),
            AccountMeta::new(self.destination_liquidity, false),
            AccountMeta::new(self.borrow_reserve, false),
            AccountMeta::new(self.borrow_reserve_liquidity_fee_receiver, false),
            AccountMeta::new(self.obligation, false),
            AccountMeta::new_readonly(self.lending_market, false),
            AccountMeta::new_readonly(
                lending_market_authority(&self.lending_market, program_id),
                false,
            ),
            AccountMeta::new_readonly(self.obligation_owner, true),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];
        if let Some(host_fee_receiver) = self.host_fee_receiver {
            accounts.push(AccountMeta::new(host_fee_receiver, false));
        }

        Instruction {
            program_id: *program_id,
            accounts,
            data: LendingInstruction::BorrowObligationLiquidity { liquidity_amount }.pack(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn accounts(host_fee_receiver: Option<Pubkey>) -> BorrowObligationLiquidity {
        BorrowObligationLiquidity {
            source_liquidity: Pubkey::new_unique(),
            destination_liquidity: Pubkey::new_unique(),
            borrow_reserve: Pubkey::new_unique(),
            borrow_reserve_liquidity_fee_receiver: Pubkey::new_unique(),
            obligation: Pubkey::new_unique(),
            lending_market: Pubkey::new_unique(),
            obligation_owner: Pubkey::new_unique(),
            host_fee_receiver,
        }
    }

    #[test]
    fn host_fee_receiver_is_appended() {
        let program_id = Pubkey::new_unique();
        assert_eq!(
            accounts(None).instruction(&program_id, 1).accounts.len(),
            ACCOUNTS.len()
        );

        let host = Pubkey::new_unique();
        let instruction = accounts(Some(host)).instruction(&program_id, 1);
        let last = instruction.accounts.last().unwrap();
        assert_eq!(last.pubkey, host);
        assert!(last.is_writable);
    }
}
