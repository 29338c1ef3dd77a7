use super::*;

pub(crate) const ACCOUNTS: &[&str] = &[
    "Source Liquidity",
    "Destination Collateral",
    "Reserve",
    "Reserve Liquidity Supply",
    "Reserve Collateral Mint",
    "Lending Market",
    "Lending Market Authority",
    "Destination Deposit Collateral",
    "Obligation",
    "Obligation Owner",
    "Reserve Liquidity Pyth",
    "Reserve Liquidity Switchboard",
    "User Transfer Authority",
    "Sysvar Clock",
    "Token Program",
];

/// Accounts for [`LendingInstruction::DepositReserveLiquidityAndObligationCollateral`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositReserveLiquidityAndObligationCollateral {
    pub source_liquidity: Pubkey,
    /// User collateral account the minted collateral passes through
    pub user_collateral: Pubkey,
    pub reserve: Pubkey,
    pub reserve_liquidity_supply: Pubkey,
    pub reserve_collateral_mint: Pubkey,
    pub lending_market: Pubkey,
    /// Reserve collateral supply
    pub destination_deposit_collateral: Pubkey,
    pub obligation: Pubkey,
    pub obligation_owner: Pubkey,
    pub reserve_liquidity_pyth_oracle: Pubkey,
    pub reserve_liquidity_switchboard_oracle: Pubkey,
    pub user_transfer_authority: Pubkey,
}

impl DepositReserveLiquidityAndObligationCollateral {
    pub fn instruction(&self, program_id: &Pubkey, liquidity_amount: u64) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![
                AccountMeta::new(self.source_liquidity, false),
                AccountMeta::new(self.user_collateral, false),
                AccountMeta::new(self.reserve, false),
                AccountMeta::new(self.reserve_liquidity_supply, false),
                AccountMeta::new(self.reserve_collateral_mint, false),
                AccountMeta::new_readonly(self.lending_market, false),
                AccountMeta::new_readonly(
                    lending_market_authority(&self.lending_market, program_id),
                    false,
                ),
                AccountMeta::new(self.destination_deposit_collateral, false),
                AccountMeta::new(self.obligation, false),
                AccountMeta::new(self.obligation_owner, true),
                AccountMeta::new_readonly(self.reserve_liquidity_pyth_oracle, false),
                AccountMeta::new_readonly(self.reserve_liquidity_switchboard_oracle, false),
                AccountMeta::new_readonly(self.user_transfer_authority, true),
                AccountMeta::new_readonly(sysvar::clock::id(), false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
            data: LendingInstruction::DepositReserveLiquidityAndObligationCollateral {
                liquidity_amount,
            }
            .pack(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_oracles_by_name() {
        let program_id = Pubkey::new_unique();
        let accounts = DepositReserveLiquidityAndObligationCollateral {
            source_liquidity: Pubkey::new_unique(),
            user_collateral: Pubkey::new_unique(),
            reserve: Pubkey::new_unique(),
            reserve_liquidity_supply: Pubkey::new_unique(),
            reserve_collateral_mint: Pubkey::new_unique(),
            lending_market: Pubkey::new_unique(),
            destination_deposit_collateral: Pubkey::new_unique(),
            obligation: Pubkey::new_unique(),
            obligation_owner: Pubkey::new_unique(),
            reserve_liquidity_pyth_oracle: Pubkey::new_unique(),
            reserve_liquidity_switchboard_oracle: Pubkey::new_unique(),
            user_transfer_authority: Pubkey::new_unique(),
        };
        let instruction = accounts.instruction(&program_id, 5_000);
        assert_eq!(instruction.data[0], 14);

        let keys: Vec<Pubkey> = instruction.accounts.iter().map(|meta| meta.pubkey).collect();
        let indices: Vec<u8> = (0..keys.len() as u8).collect();
        let decoded = decode_instruction(
            &ProgramConfig::new(program_id),
            &instruction.data,
            &keys,
            &indices,
        )
        .unwrap();

        assert_eq!(
            decoded.get("Reserve Liquidity Pyth"),
            Some(&DecodedValue::PublicKey(accounts.reserve_liquidity_pyth_oracle))
        );
        assert_eq!(
            decoded.get("Reserve Liquidity Switchboard"),
            Some(&DecodedValue::PublicKey(
                accounts.reserve_liquidity_switchboard_oracle
            ))
        );
        assert_eq!(decoded.get("Liquidity Amount"), Some(&DecodedValue::U64(5_000)));
    }
}
