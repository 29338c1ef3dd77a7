use super::*;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};

/// Lending market state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LendingMarket {
    /// Version of lending market
    pub version: u8,
    /// Bump seed for derived authority address
    pub bump_seed: u8,
    /// Owner authority which can add new reserves
    pub owner: Pubkey,
    /// Currency market prices are quoted in
    /// e.g. "USD" null padded (`*b"USD\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0"`) or a SPL token mint pubkey
    pub quote_currency: [u8; 32],
    /// Token program id
    pub token_program_id: Pubkey,
    /// Oracle (Pyth) program id
    pub oracle_program_id: Pubkey,
    /// Oracle (Switchboard) program id
    pub switchboard_oracle_program_id: Pubkey,
}

impl LendingMarket {
    /// Offset of the owner field, for program account filters
    pub const OWNER_OFFSET: usize = 2;

    /// Whether the account has been initialized by the program
    pub fn is_initialized(&self) -> bool {
        self.version != UNINITIALIZED_VERSION
    }

    /// Quote currency as text when it is a null padded symbol such as "USD"
    pub fn quote_currency_symbol(&self) -> Option<&str> {
        let end = self
            .quote_currency
            .iter()
            .position(|byte| *byte == 0)
            .unwrap_or(self.quote_currency.len());
        let (symbol, padding) = self.quote_currency.split_at(end);
        if symbol.is_empty() || padding.iter().any(|byte| *byte != 0) {
            return None;
        }
        std::str::from_utf8(symbol)
            .ok()
            .filter(|symbol| symbol.chars().all(|c| c.is_ascii_graphic()))
    }
}

/// Derive the authority that signs for a lending market's token accounts
pub fn find_lending_market_authority(lending_market: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[lending_market.as_ref()], program_id)
}

const LENDING_MARKET_LEN: usize = 290; // 1 + 1 + 32 + 32 + 32 + 32 + 32 + 128
const LENDING_MARKET_PADDING: usize = 128;

impl Layout for LendingMarket {
    const LEN: usize = LENDING_MARKET_LEN;

    fn unpack_from_slice(src: &[u8]) -> Result<Self, LendingError> {
        let src = array_ref![src, 0, LENDING_MARKET_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            version,
            bump_seed,
            owner,
            quote_currency,
            token_program_id,
            oracle_program_id,
            switchboard_oracle_program_id,
            _padding,
        ) = array_refs![
            src,
            1,
            1,
            PUBKEY_BYTES,
            32,
            PUBKEY_BYTES,
            PUBKEY_BYTES,
            PUBKEY_BYTES,
            LENDING_MARKET_PADDING
        ];

        Ok(Self {
            version: u8::from_le_bytes(*version),
            bump_seed: u8::from_le_bytes(*bump_seed),
            owner: Pubkey::new_from_array(*owner),
            quote_currency: *quote_currency,
            token_program_id: Pubkey::new_from_array(*token_program_id),
            oracle_program_id: Pubkey::new_from_array(*oracle_program_id),
            switchboard_oracle_program_id: Pubkey::new_from_array(*switchboard_oracle_program_id),
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), LendingError> {
        let dst = array_mut_ref![dst, 0, LENDING_MARKET_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            version,
            bump_seed,
            owner,
            quote_currency,
            token_program_id,
            oracle_program_id,
            switchboard_oracle_program_id,
            padding,
        ) = mut_array_refs![
            dst,
            1,
            1,
            PUBKEY_BYTES,
            32,
            PUBKEY_BYTES,
            PUBKEY_BYTES,
            PUBKEY_BYTES,
            LENDING_MARKET_PADDING
        ];

        *version = self.version.to_le_bytes();
        *bump_seed = self.bump_seed.to_le_bytes();
        pack_pubkey(&self.owner, owner);
        *quote_currency = self.quote_currency;
        pack_pubkey(&self.token_program_id, token_program_id);
        pack_pubkey(&self.oracle_program_id, oracle_program_id);
        pack_pubkey(
            &self.switchboard_oracle_program_id,
            switchboard_oracle_program_id,
        );
        *padding = [0; LENDING_MARKET_PADDING];
        Ok(())
    }
}
