use super::*;
use crate::math::ten_pow;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use rust_decimal::Decimal;

/// Lending market obligation state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Obligation {
    /// Version of the struct
    pub version: u8,
    /// Last update to collateral, liquidity, or their market values
    pub last_update: LastUpdate,
    /// Lending market address
    pub lending_market: Pubkey,
    /// Owner authority which can borrow liquidity
    pub owner: Pubkey,
    /// Deposited collateral for the obligation, unique by deposit reserve address
    pub deposits: Vec<ObligationCollateral>,
    /// Borrowed liquidity for the obligation, unique by borrow reserve address
    pub borrows: Vec<ObligationLiquidity>,
    /// Market value of deposits
    pub deposited_value: Wad,
    /// Market value of borrows
    pub borrowed_value: Wad,
    /// The maximum borrow value at the weighted average loan to value ratio
    pub allowed_borrow_value: Wad,
    /// The dangerous borrow value at the weighted average liquidation threshold
    pub unhealthy_borrow_value: Wad,
}

impl Obligation {
    /// Offset of the lending market field, for program account filters
    pub const LENDING_MARKET_OFFSET: usize = 10;
    /// Offset of the owner field, for program account filters
    pub const OWNER_OFFSET: usize = 42;

    /// Whether the account has been initialized by the program
    pub fn is_initialized(&self) -> bool {
        self.version != UNINITIALIZED_VERSION
    }

    /// Find collateral by deposit reserve
    pub fn find_collateral_in_deposits(
        &self,
        deposit_reserve: &Pubkey,
    ) -> Option<(&ObligationCollateral, usize)> {
        self.deposits
            .iter()
            .enumerate()
            .find(|(_, collateral)| collateral.deposit_reserve == *deposit_reserve)
            .map(|(index, collateral)| (collateral, index))
    }

    /// Find liquidity by borrow reserve
    pub fn find_liquidity_in_borrows(
        &self,
        borrow_reserve: &Pubkey,
    ) -> Option<(&ObligationLiquidity, usize)> {
        self.borrows
            .iter()
            .enumerate()
            .find(|(_, liquidity)| liquidity.borrow_reserve == *borrow_reserve)
            .map(|(index, liquidity)| (liquidity, index))
    }

    /// Value every deposit and borrow against the current state of its
    /// reserve. Entries whose reserve is not among `reserves` are left out
    /// of the result.
    pub fn calculate_position(
        &self,
        reserves: &[KeyedAccount<Reserve>],
    ) -> Result<PositionStats, LendingError> {
        self.calculate(reserves, false)
    }

    /// Like [`Obligation::calculate_position`], but fails on the first entry
    /// whose reserve was not supplied
    pub fn calculate_position_strict(
        &self,
        reserves: &[KeyedAccount<Reserve>],
    ) -> Result<PositionStats, LendingError> {
        self.calculate(reserves, true)
    }

    fn calculate(
        &self,
        reserves: &[KeyedAccount<Reserve>],
        strict: bool,
    ) -> Result<PositionStats, LendingError> {
        let mut stats = ObligationStats::default();
        let mut deposits = Vec::with_capacity(self.deposits.len());
        let mut borrows = Vec::with_capacity(self.borrows.len());

        for collateral in &self.deposits {
            let reserve = match find_reserve(reserves, &collateral.deposit_reserve, strict)? {
                Some(reserve) => reserve,
                None => continue,
            };
            let position = value_position(reserve, collateral.liquidity_amount(reserve)?)?;

            stats.user_total_deposit = add(stats.user_total_deposit, position.amount_usd)?;
            stats.borrow_limit = add(
                stats.borrow_limit,
                mul(position.amount_usd, reserve.config.loan_to_value())?,
            )?;
            stats.liquidation_threshold = add(
                stats.liquidation_threshold,
                mul(
                    position.amount_usd,
                    reserve.config.liquidation_threshold_ratio(),
                )?,
            )?;
            if !position.native_amount.is_zero() {
                stats.positions += 1;
            }
            deposits.push(position);
        }

        for liquidity in &self.borrows {
            let reserve = match find_reserve(reserves, &liquidity.borrow_reserve, strict)? {
                Some(reserve) => reserve,
                None => continue,
            };
            let borrowed_amount = liquidity.current_borrowed_amount(reserve)?;
            let borrowed_amount = Decimal::from_i128_with_scale(
                i128::try_from(borrowed_amount).map_err(|_| LendingError::MathOverflow)?,
                0,
            );
            let position = value_position(reserve, borrowed_amount)?;

            stats.user_total_borrow = add(stats.user_total_borrow, position.amount_usd)?;
            if !position.native_amount.is_zero() {
                stats.positions += 1;
            }
            borrows.push(position);
        }

        stats.borrow_utilization = if stats.user_total_deposit.is_zero() {
            None
        } else {
            Some(
                stats
                    .user_total_borrow
                    .checked_div(stats.user_total_deposit)
                    .ok_or(LendingError::MathOverflow)?,
            )
        };
        stats.net_account_value = stats
            .user_total_deposit
            .checked_sub(stats.user_total_borrow)
            .ok_or(LendingError::MathOverflow)?;

        Ok(PositionStats {
            deposits,
            borrows,
            stats,
        })
    }
}

fn find_reserve<'a>(
    reserves: &'a [KeyedAccount<Reserve>],
    key: &Pubkey,
    strict: bool,
) -> Result<Option<&'a Reserve>, LendingError> {
    match reserves.iter().find(|reserve| reserve.pubkey == *key) {
        Some(reserve) => Ok(Some(&reserve.account)),
        None if strict => Err(LendingError::MissingReserveAccount(*key)),
        None => {
            warn!("Reserve {} not supplied, skipping obligation entry", key);
            Ok(None)
        }
    }
}

fn value_position(reserve: &Reserve, native_amount: Decimal) -> Result<Position, LendingError> {
    Ok(Position {
        mint_address: reserve.liquidity.mint_pubkey,
        native_amount,
        native_amount_ui: native_amount
            .checked_div(ten_pow(reserve.liquidity.mint_decimals)?)
            .ok_or(LendingError::MathOverflow)?,
        amount_usd: reserve.market_value(native_amount)?,
    })
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, LendingError> {
    a.checked_add(b).ok_or(LendingError::MathOverflow)
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, LendingError> {
    a.checked_mul(b).ok_or(LendingError::MathOverflow)
}

/// Obligation collateral state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObligationCollateral {
    /// Reserve collateral is deposited to
    pub deposit_reserve: Pubkey,
    /// Amount of collateral deposited
    pub deposited_amount: u64,
    /// Collateral market value in quote currency
    pub market_value: Wad,
}

impl ObligationCollateral {
    /// Deposited collateral converted to native liquidity units of `reserve`
    pub fn liquidity_amount(&self, reserve: &Reserve) -> Result<Decimal, LendingError> {
        reserve
            .collateral_exchange_rate()?
            .collateral_to_liquidity(self.deposited_amount)
    }
}

/// Obligation liquidity state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObligationLiquidity {
    /// Reserve liquidity is borrowed from
    pub borrow_reserve: Pubkey,
    /// Borrow rate used for calculating interest
    pub cumulative_borrow_rate_wads: Wad,
    /// Amount of liquidity borrowed plus interest
    pub borrowed_amount_wads: Wad,
    /// Liquidity market value in quote currency
    pub market_value: Wad,
}

impl ObligationLiquidity {
    /// Borrowed amount with interest accrued up to the reserve's current
    /// cumulative rate, in whole native units
    pub fn current_borrowed_amount(&self, reserve: &Reserve) -> Result<u128, LendingError> {
        self.borrowed_amount_wads.try_rebase_floor(
            reserve.liquidity.cumulative_borrow_rate_wads,
            self.cumulative_borrow_rate_wads,
        )
    }
}

const OBLIGATION_COLLATERAL_LEN: usize = 88; // 32 + 8 + 16 + 32
const OBLIGATION_LIQUIDITY_LEN: usize = 112; // 32 + 16 + 16 + 16 + 32
const OBLIGATION_LEN: usize = 1300; // 1 + 9 + 32 + 32 + 16 + 16 + 16 + 16 + 64 + 1 + 1 + 1096
const OBLIGATION_PADDING: usize = 64;
const OBLIGATION_DATA_FLAT_LEN: usize = 1096;
const OBLIGATION_ENTRY_PADDING: usize = 32;

fn entries_fit(deposits_len: usize, borrows_len: usize) -> bool {
    deposits_len * OBLIGATION_COLLATERAL_LEN + borrows_len * OBLIGATION_LIQUIDITY_LEN
        <= OBLIGATION_DATA_FLAT_LEN
}

impl Layout for Obligation {
    const LEN: usize = OBLIGATION_LEN;

    /// Unpacks a byte buffer into an [Obligation].
    fn unpack_from_slice(src: &[u8]) -> Result<Self, LendingError> {
        let input = array_ref![src, 0, OBLIGATION_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            version,
            last_update,
            lending_market,
            owner,
            deposited_value,
            borrowed_value,
            allowed_borrow_value,
            unhealthy_borrow_value,
            _padding,
            deposits_len,
            borrows_len,
            data_flat,
        ) = array_refs![
            input,
            1,
            LAST_UPDATE_LEN,
            PUBKEY_BYTES,
            PUBKEY_BYTES,
            16,
            16,
            16,
            16,
            OBLIGATION_PADDING,
            1,
            1,
            OBLIGATION_DATA_FLAT_LEN
        ];

        let deposits_len = u8::from_le_bytes(*deposits_len);
        let borrows_len = u8::from_le_bytes(*borrows_len);
        if !entries_fit(deposits_len as usize, borrows_len as usize) {
            return Err(LendingError::InvalidObligationEntries {
                deposits: deposits_len,
                borrows: borrows_len,
            });
        }

        let mut offset = 0;
        let mut deposits = Vec::with_capacity(deposits_len as usize);
        for _ in 0..deposits_len {
            let data = array_ref![data_flat, offset, OBLIGATION_COLLATERAL_LEN];
            deposits.push(ObligationCollateral::unpack(data)?);
            offset += OBLIGATION_COLLATERAL_LEN;
        }
        let mut borrows = Vec::with_capacity(borrows_len as usize);
        for _ in 0..borrows_len {
            let data = array_ref![data_flat, offset, OBLIGATION_LIQUIDITY_LEN];
            borrows.push(ObligationLiquidity::unpack(data)?);
            offset += OBLIGATION_LIQUIDITY_LEN;
        }

        Ok(Self {
            version: u8::from_le_bytes(*version),
            last_update: LastUpdate::unpack(last_update)?,
            lending_market: Pubkey::new_from_array(*lending_market),
            owner: Pubkey::new_from_array(*owner),
            deposits,
            borrows,
            deposited_value: unpack_wad(deposited_value),
            borrowed_value: unpack_wad(borrowed_value),
            allowed_borrow_value: unpack_wad(allowed_borrow_value),
            unhealthy_borrow_value: unpack_wad(unhealthy_borrow_value),
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), LendingError> {
        let invalid_entries = || LendingError::InvalidObligationEntries {
            deposits: u8::try_from(self.deposits.len()).unwrap_or(u8::MAX),
            borrows: u8::try_from(self.borrows.len()).unwrap_or(u8::MAX),
        };
        if !entries_fit(self.deposits.len(), self.borrows.len()) {
            return Err(invalid_entries());
        }

        let output = array_mut_ref![dst, 0, OBLIGATION_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (
            version,
            last_update,
            lending_market,
            owner,
            deposited_value,
            borrowed_value,
            allowed_borrow_value,
            unhealthy_borrow_value,
            padding,
            deposits_len,
            borrows_len,
            data_flat,
        ) = mut_array_refs![
            output,
            1,
            LAST_UPDATE_LEN,
            PUBKEY_BYTES,
            PUBKEY_BYTES,
            16,
            16,
            16,
            16,
            OBLIGATION_PADDING,
            1,
            1,
            OBLIGATION_DATA_FLAT_LEN
        ];

        *version = self.version.to_le_bytes();
        self.last_update.pack_into_slice(last_update)?;
        pack_pubkey(&self.lending_market, lending_market);
        pack_pubkey(&self.owner, owner);
        pack_wad(self.deposited_value, deposited_value)?;
        pack_wad(self.borrowed_value, borrowed_value)?;
        pack_wad(self.allowed_borrow_value, allowed_borrow_value)?;
        pack_wad(self.unhealthy_borrow_value, unhealthy_borrow_value)?;
        *padding = [0; OBLIGATION_PADDING];
        *deposits_len = (self.deposits.len() as u8).to_le_bytes();
        *borrows_len = (self.borrows.len() as u8).to_le_bytes();
        *data_flat = [0; OBLIGATION_DATA_FLAT_LEN];

        let mut offset = 0;
        for collateral in &self.deposits {
            let data = array_mut_ref![data_flat, offset, OBLIGATION_COLLATERAL_LEN];
            collateral.pack_into_slice(data)?;
            offset += OBLIGATION_COLLATERAL_LEN;
        }
        for liquidity in &self.borrows {
            let data = array_mut_ref![data_flat, offset, OBLIGATION_LIQUIDITY_LEN];
            liquidity.pack_into_slice(data)?;
            offset += OBLIGATION_LIQUIDITY_LEN;
        }
        Ok(())
    }
}

impl Layout for ObligationCollateral {
    const LEN: usize = OBLIGATION_COLLATERAL_LEN;

    fn unpack_from_slice(src: &[u8]) -> Result<Self, LendingError> {
        let src = array_ref![src, 0, OBLIGATION_COLLATERAL_LEN];
        let (deposit_reserve, deposited_amount, market_value, _padding) =
            array_refs![src, PUBKEY_BYTES, 8, 16, OBLIGATION_ENTRY_PADDING];

        Ok(Self {
            deposit_reserve: Pubkey::new_from_array(*deposit_reserve),
            deposited_amount: u64::from_le_bytes(*deposited_amount),
            market_value: unpack_wad(market_value),
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), LendingError> {
        let dst = array_mut_ref![dst, 0, OBLIGATION_COLLATERAL_LEN];
        let (deposit_reserve, deposited_amount, market_value, padding) =
            mut_array_refs![dst, PUBKEY_BYTES, 8, 16, OBLIGATION_ENTRY_PADDING];

        pack_pubkey(&self.deposit_reserve, deposit_reserve);
        *deposited_amount = self.deposited_amount.to_le_bytes();
        pack_wad(self.market_value, market_value)?;
        *padding = [0; OBLIGATION_ENTRY_PADDING];
        Ok(())
    }
}

impl Layout for ObligationLiquidity {
    const LEN: usize = OBLIGATION_LIQUIDITY_LEN;

    fn unpack_from_slice(src: &[u8]) -> Result<Self, LendingError> {
        let src = array_ref![src, 0, OBLIGATION_LIQUIDITY_LEN];
        let (borrow_reserve, cumulative_borrow_rate_wads, borrowed_amount_wads, market_value, _padding) =
            array_refs![src, PUBKEY_BYTES, 16, 16, 16, OBLIGATION_ENTRY_PADDING];

        Ok(Self {
            borrow_reserve: Pubkey::new_from_array(*borrow_reserve),
            cumulative_borrow_rate_wads: unpack_wad(cumulative_borrow_rate_wads),
            borrowed_amount_wads: unpack_wad(borrowed_amount_wads),
            market_value: unpack_wad(market_value),
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) -> Result<(), LendingError> {
        let dst = array_mut_ref![dst, 0, OBLIGATION_LIQUIDITY_LEN];
        let (borrow_reserve, cumulative_borrow_rate_wads, borrowed_amount_wads, market_value, padding) =
            mut_array_refs![dst, PUBKEY_BYTES, 16, 16, 16, OBLIGATION_ENTRY_PADDING];

        pack_pubkey(&self.borrow_reserve, borrow_reserve);
        pack_wad(self.cumulative_borrow_rate_wads, cumulative_borrow_rate_wads)?;
        pack_wad(self.borrowed_amount_wads, borrowed_amount_wads)?;
        pack_wad(self.market_value, market_value)?;
        *padding = [0; OBLIGATION_ENTRY_PADDING];
        Ok(())
    }
}
