use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Collateral",
    "Reserve",
    "Reserve Liquidity Mint",
    "Reserve Liquidity Supply",
    "Reserve Liquidity Fee Receiver",
    "Reserve Collateral Mint",
    "Reserve Collateral Supply",
    "Pyth Product",
    "Pyth Price",
    "Switchboard Feed",
    "Lending Market",
    "Lending Market Authority",
    "Lending Market Owner",
    "User Transfer Authority",
    "Sysvar Clock",
    "Sysvar Rent",
    "Token Program",
];

/// Accounts for [`LendingInstruction::InitReserve`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitReserve {
    /// Source liquidity token account, owned by the user transfer authority
    pub source_liquidity: Pubkey,
    /// Destination collateral token account, uninitialized
    pub destination_collateral: Pubkey,
    /// Reserve account, uninitialized and rent exempt
    pub reserve: Pubkey,
    pub reserve_liquidity_mint: Pubkey,
    pub reserve_liquidity_supply: Pubkey,
    pub reserve_liquidity_fee_receiver: Pubkey,
    pub reserve_collateral_mint: Pubkey,
    pub reserve_collateral_supply: Pubkey,
    pub pyth_product: Pubkey,
    pub pyth_price: Pubkey,
    pub switchboard_feed: Pubkey,
    pub lending_market: Pubkey,
    pub lending_market_owner: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl InitReserve {
    pub fn instruction(
        &self,
        program_id: &Pubkey,
        liquidity_amount: u64,
        config: ReserveConfig,
    ) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_liquidity, false),
                AccountMeta::new(self.destination_collateral, false),
                AccountMeta::new(self.reserve, false),
                AccountMeta::new_readonly(self.reserve_liquidity_mint, false),
                AccountMeta::new(self.reserve_liquidity_supply, false),
                AccountMeta::new(self.reserve_liquidity_fee_receiver, false),
                AccountMeta::new(self.reserve_collateral_mint, false),
                AccountMeta::new(self.reserve_collateral_supply, false),
                AccountMeta::new_readonly(self.pyth_product, false),
                AccountMeta::new_readonly(self.pyth_price, false),
                AccountMeta::new_readonly(self.switchboard_feed, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new_readonly(self.lending_market_owner, true),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::InitReserve {
                liquidity_amount,
                config,
            }
            .pack(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_every_named_account() {
        let accounts = InitReserve {
            source_liquidity: Pubkey::new_unique(),
            destination_collateral: Pubkey::new_unique(),
            reserve: Pubkey::new_unique(),
            reserve_liquidity_mint: Pubkey::new_unique(),
            reserve_liquidity_supply: Pubkey::new_unique(),
            reserve_liquidity_fee_receiver: Pubkey::new_unique(),
            reserve_collateral_mint: Pubkey::new_unique(),
            reserve_collateral_supply: Pubkey::new_unique(),
            pyth_product: Pubkey::new_unique(),
            pyth_price: Pubkey::new_unique(),
            switchboard_feed: Pubkey::new_unique(),
            lending_market: Pubkey::new_unique(),
            lending_market_owner: Pubkey::new_unique(),
            user_transfer_authority: Pubkey::new_unique(),
        };
        let program_id = Pubkey::new_unique();
        let instruction = accounts.instruction(&program_id, 1_000, ReserveConfig::default());

        assert_eq!(instruction.accounts.len(), ACCOUNTS.len());
        assert_eq!(instruction.data.len(), 1 + 8 + RESERVE_CONFIG_LEN);
        assert_eq!(
            instruction.accounts[12].pubkey,
            find_lending_market_authority(&accounts.lending_market, &program_id).0
        );
        let signers: Vec<usize> = instruction
            .accounts
            .iter()
            .enumerate()
            .filter(|(_, meta)| meta.is_signer)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(signers, vec![13, 14]);
    }
}
