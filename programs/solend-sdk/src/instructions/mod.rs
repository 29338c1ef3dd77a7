//! Instruction encoding, decoding and building

pub mod borrow_obligation_liquidity;
pub mod deposit_obligation_collateral;
pub mod deposit_reserve_liquidity;
pub mod deposit_reserve_liquidity_and_obligation_collateral;
pub mod flash_loan;
pub mod init_lending_market;
pub mod init_obligation;
pub mod init_reserve;
pub mod liquidate_obligation;
pub mod redeem_reserve_collateral;
pub mod refresh_obligation;
pub mod refresh_reserve;
pub mod repay_obligation_liquidity;
pub mod set_lending_market_owner;
pub mod update_reserve_config;
pub mod withdraw_obligation_collateral;
pub mod withdraw_obligation_collateral_and_redeem_reserve_collateral;

pub use borrow_obligation_liquidity::BorrowObligationLiquidity;
pub use deposit_obligation_collateral::DepositObligationCollateral;
pub use deposit_reserve_liquidity::DepositReserveLiquidity;
pub use deposit_reserve_liquidity_and_obligation_collateral::DepositReserveLiquidityAndObligationCollateral;
pub use flash_loan::FlashLoan;
pub use init_lending_market::InitLendingMarket;
pub use init_obligation::InitObligation;
pub use init_reserve::InitReserve;
pub use liquidate_obligation::LiquidateObligation;
pub use redeem_reserve_collateral::RedeemReserveCollateral;
pub use refresh_obligation::RefreshObligation;
pub use refresh_reserve::RefreshReserve;
pub use repay_obligation_liquidity::RepayObligationLiquidity;
pub use set_lending_market_owner::SetLendingMarketOwner;
pub use update_reserve_config::UpdateReserveConfig;
pub use withdraw_obligation_collateral::WithdrawObligationCollateral;
pub use withdraw_obligation_collateral_and_redeem_reserve_collateral::WithdrawObligationCollateralAndRedeemReserveCollateral;

use crate::{
    config::ProgramConfig,
    error::LendingError,
    state::{find_lending_market_authority, ReserveConfig, RESERVE_CONFIG_LEN},
};
use borsh::BorshDeserialize;
use log::{debug, trace};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey,
    pubkey::Pubkey,
    sysvar,
};
use std::{fmt, mem::size_of};

/// SPL Token program
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Opcodes of the lending program, as carried in the first data byte
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum InstructionKind {
    InitLendingMarket = 0,
    SetLendingMarketOwner = 1,
    InitReserve = 2,
    RefreshReserve = 3,
    DepositReserveLiquidity = 4,
    RedeemReserveCollateral = 5,
    InitObligation = 6,
    RefreshObligation = 7,
    DepositObligationCollateral = 8,
    WithdrawObligationCollateral = 9,
    BorrowObligationLiquidity = 10,
    RepayObligationLiquidity = 11,
    LiquidateObligation = 12,
    FlashLoan = 13,
    DepositReserveLiquidityAndObligationCollateral = 14,
    WithdrawObligationCollateralAndRedeemReserveCollateral = 15,
    UpdateReserveConfig = 16,
}

/// How accounts past an instruction's fixed list are named
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountTail {
    /// Extra accounts carry no meaning
    Ignored,
    /// A single optional account
    Optional(&'static str),
    /// Any number of accounts, numbered from 1
    Numbered(&'static str),
}

impl InstructionKind {
    /// Map an opcode byte to its instruction
    pub fn from_opcode(opcode: u8) -> Result<Self, LendingError> {
        Self::from_u8(opcode).ok_or(LendingError::UnknownInstruction(opcode))
    }

    /// Human-readable instruction name
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitLendingMarket => "Initialize Lending Market",
            Self::SetLendingMarketOwner => "Set Lending Market Owner",
            Self::InitReserve => "Initialize Reserve",
            Self::RefreshReserve => "Refresh Reserve",
            Self::DepositReserveLiquidity => "Deposit Reserve Liquidity",
            Self::RedeemReserveCollateral => "Redeem Reserve Collateral",
            Self::InitObligation => "Initialize Obligation",
            Self::RefreshObligation => "Refresh Obligation",
            Self::DepositObligationCollateral => "Deposit Obligation Collateral",
            Self::WithdrawObligationCollateral => "Withdraw Obligation Collateral",
            Self::BorrowObligationLiquidity => "Borrow Obligation Liquidity",
            Self::RepayObligationLiquidity => "Repay Obligation Liquidity",
            Self::LiquidateObligation => "Liquidate Obligation",
            Self::FlashLoan => "Flash Loan",
            Self::DepositReserveLiquidityAndObligationCollateral => {
                "Deposit Reserve Liquidity And Obligation Collateral"
            }
            Self::WithdrawObligationCollateralAndRedeemReserveCollateral => {
                "Withdraw Obligation Collateral And Redeem Reserve Collateral"
            }
            Self::UpdateReserveConfig => "Update Reserve Config",
        }
    }

    /// Names of the fixed accounts, in the order the program expects them
    pub fn account_names(&self) -> &'static [&'static str] {
        match self {
            Self::InitLendingMarket => init_lending_market::ACCOUNTS,
            Self::SetLendingMarketOwner => set_lending_market_owner::ACCOUNTS,
            Self::InitReserve => init_reserve::ACCOUNTS,
            Self::RefreshReserve => refresh_reserve::ACCOUNTS,
            Self::DepositReserveLiquidity => deposit_reserve_liquidity::ACCOUNTS,
            Self::RedeemReserveCollateral => redeem_reserve_collateral::ACCOUNTS,
            Self::InitObligation => init_obligation::ACCOUNTS,
            Self::RefreshObligation => refresh_obligation::ACCOUNTS,
            Self::DepositObligationCollateral => deposit_obligation_collateral::ACCOUNTS,
            Self::WithdrawObligationCollateral => withdraw_obligation_collateral::ACCOUNTS,
            Self::BorrowObligationLiquidity => borrow_obligation_liquidity::ACCOUNTS,
            Self::RepayObligationLiquidity => repay_obligation_liquidity::ACCOUNTS,
            Self::LiquidateObligation => liquidate_obligation::ACCOUNTS,
            Self::FlashLoan => flash_loan::ACCOUNTS,
            Self::DepositReserveLiquidityAndObligationCollateral => {
                deposit_reserve_liquidity_and_obligation_collateral::ACCOUNTS
            }
            Self::WithdrawObligationCollateralAndRedeemReserveCollateral => {
                withdraw_obligation_collateral_and_redeem_reserve_collateral::ACCOUNTS
            }
            Self::UpdateReserveConfig => update_reserve_config::ACCOUNTS,
        }
    }

    /// Naming of accounts past [`InstructionKind::account_names`]
    pub fn account_tail(&self) -> AccountTail {
        match self {
            Self::RefreshObligation => AccountTail::Numbered(refresh_obligation::RESERVE_ACCOUNT),
            Self::FlashLoan => AccountTail::Numbered(flash_loan::RECEIVER_ACCOUNT),
            Self::BorrowObligationLiquidity => {
                AccountTail::Optional(borrow_obligation_liquidity::HOST_FEE_RECEIVER)
            }
            _ => AccountTail::Ignored,
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instructions supported by the lending program, with their arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LendingInstruction {
    /// Initializes a new lending market.
    InitLendingMarket {
        /// Owner authority which can add new reserves
        owner: Pubkey,
        /// Currency market prices are quoted in
        quote_currency: [u8; 32],
    },

    /// Sets the new owner of a lending market.
    SetLendingMarketOwner {
        /// The new owner
        new_owner: Pubkey,
    },

    /// Initializes a new lending market reserve.
    InitReserve {
        /// Initial amount of liquidity to deposit into the new reserve
        liquidity_amount: u64,
        /// Reserve configuration values
        config: ReserveConfig,
    },

    /// Accrue interest and update market price of liquidity on a reserve.
    RefreshReserve,

    /// Deposit liquidity into a reserve in exchange for collateral.
    DepositReserveLiquidity {
        /// Amount of liquidity to deposit in exchange for collateral tokens
        liquidity_amount: u64,
    },

    /// Redeem collateral from a reserve in exchange for liquidity.
    RedeemReserveCollateral {
        /// Amount of collateral tokens to redeem in exchange for liquidity
        collateral_amount: u64,
    },

    /// Initializes a new lending market obligation.
    InitObligation,

    /// Refresh an obligation's accrued interest and collateral and liquidity prices.
    RefreshObligation,

    /// Deposit collateral to an obligation.
    DepositObligationCollateral {
        /// Amount of collateral tokens to deposit
        collateral_amount: u64,
    },

    /// Withdraw collateral from an obligation.
    WithdrawObligationCollateral {
        /// Amount of collateral tokens to withdraw - u64::MAX for up to 100% of deposited amount
        collateral_amount: u64,
    },

    /// Borrow liquidity from a reserve by depositing collateral tokens.
    BorrowObligationLiquidity {
        /// Amount of liquidity to borrow - u64::MAX for 100% of borrowing power
        liquidity_amount: u64,
    },

    /// Repay borrowed liquidity to a reserve.
    RepayObligationLiquidity {
        /// Amount of liquidity to repay - u64::MAX for 100% of borrowed amount
        liquidity_amount: u64,
    },

    /// Repay borrowed liquidity to a reserve to receive collateral at a
    /// discount from an unhealthy obligation.
    LiquidateObligation {
        /// Amount of liquidity to repay - u64::MAX for up to 100% of borrowed amount
        liquidity_amount: u64,
    },

    /// Make a flash loan.
    FlashLoan {
        /// The amount that is to be borrowed - u64::MAX for up to 100% of available liquidity
        amount: u64,
    },

    /// Combines DepositReserveLiquidity and DepositObligationCollateral
    DepositReserveLiquidityAndObligationCollateral {
        /// Amount of liquidity to deposit in exchange
        liquidity_amount: u64,
    },

    /// Combines WithdrawObligationCollateral and RedeemReserveCollateral
    WithdrawObligationCollateralAndRedeemReserveCollateral {
        /// Amount of collateral tokens to withdraw
        collateral_amount: u64,
    },

    /// Updates a reserve config.
    UpdateReserveConfig {
        /// Reserve config to update to
        config: ReserveConfig,
    },
}

impl LendingInstruction {
    /// Opcode of this instruction
    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::InitLendingMarket { .. } => InstructionKind::InitLendingMarket,
            Self::SetLendingMarketOwner { .. } => InstructionKind::SetLendingMarketOwner,
            Self::InitReserve { .. } => InstructionKind::InitReserve,
            Self::RefreshReserve => InstructionKind::RefreshReserve,
            Self::DepositReserveLiquidity { .. } => InstructionKind::DepositReserveLiquidity,
            Self::RedeemReserveCollateral { .. } => InstructionKind::RedeemReserveCollateral,
            Self::InitObligation => InstructionKind::InitObligation,
            Self::RefreshObligation => InstructionKind::RefreshObligation,
            Self::DepositObligationCollateral { .. } => {
                InstructionKind::DepositObligationCollateral
            }
            Self::WithdrawObligationCollateral { .. } => {
                InstructionKind::WithdrawObligationCollateral
            }
            Self::BorrowObligationLiquidity { .. } => InstructionKind::BorrowObligationLiquidity,
            Self::RepayObligationLiquidity { .. } => InstructionKind::RepayObligationLiquidity,
            Self::LiquidateObligation { .. } => InstructionKind::LiquidateObligation,
            Self::FlashLoan { .. } => InstructionKind::FlashLoan,
            Self::DepositReserveLiquidityAndObligationCollateral { .. } => {
                InstructionKind::DepositReserveLiquidityAndObligationCollateral
            }
            Self::WithdrawObligationCollateralAndRedeemReserveCollateral { .. } => {
                InstructionKind::WithdrawObligationCollateralAndRedeemReserveCollateral
            }
            Self::UpdateReserveConfig { .. } => InstructionKind::UpdateReserveConfig,
        }
    }

    /// Unpacks a byte buffer into a [LendingInstruction].
    ///
    /// The buffer must hold at least the opcode and its arguments.
    pub fn unpack(input: &[u8]) -> Result<Self, LendingError> {
        let (&tag, rest) = input
            .split_first()
            .ok_or(LendingError::InvalidInstructionData)?;
        Ok(match InstructionKind::from_opcode(tag)? {
            InstructionKind::InitLendingMarket => {
                let (owner, quote_currency) = unpack_args::<([u8; 32], [u8; 32])>(rest)?;
                Self::InitLendingMarket {
                    owner: Pubkey::new_from_array(owner),
                    quote_currency,
                }
            }
            InstructionKind::SetLendingMarketOwner => Self::SetLendingMarketOwner {
                new_owner: Pubkey::new_from_array(unpack_args(rest)?),
            },
            InstructionKind::InitReserve => {
                let (liquidity_amount, config) =
                    unpack_args::<(u64, [u8; RESERVE_CONFIG_LEN])>(rest)?;
                Self::InitReserve {
                    liquidity_amount,
                    config: ReserveConfig::unpack_config(&config),
                }
            }
            InstructionKind::RefreshReserve => {
                unpack_args::<()>(rest)?;
                Self::RefreshReserve
            }
            InstructionKind::DepositReserveLiquidity => Self::DepositReserveLiquidity {
                liquidity_amount: unpack_args(rest)?,
            },
            InstructionKind::RedeemReserveCollateral => Self::RedeemReserveCollateral {
                collateral_amount: unpack_args(rest)?,
            },
            InstructionKind::InitObligation => {
                unpack_args::<()>(rest)?;
                Self::InitObligation
            }
            InstructionKind::RefreshObligation => {
                unpack_args::<()>(rest)?;
                Self::RefreshObligation
            }
            InstructionKind::DepositObligationCollateral => Self::DepositObligationCollateral {
                collateral_amount: unpack_args(rest)?,
            },
            InstructionKind::WithdrawObligationCollateral => Self::WithdrawObligationCollateral {
                collateral_amount: unpack_args(rest)?,
            },
            InstructionKind::BorrowObligationLiquidity => Self::BorrowObligationLiquidity {
                liquidity_amount: unpack_args(rest)?,
            },
            InstructionKind::RepayObligationLiquidity => Self::RepayObligationLiquidity {
                liquidity_amount: unpack_args(rest)?,
            },
            InstructionKind::LiquidateObligation => Self::LiquidateObligation {
                liquidity_amount: unpack_args(rest)?,
            },
            InstructionKind::FlashLoan => Self::FlashLoan {
                amount: unpack_args(rest)?,
            },
            InstructionKind::DepositReserveLiquidityAndObligationCollateral => {
                Self::DepositReserveLiquidityAndObligationCollateral {
                    liquidity_amount: unpack_args(rest)?,
                }
            }
            InstructionKind::WithdrawObligationCollateralAndRedeemReserveCollateral => {
                Self::WithdrawObligationCollateralAndRedeemReserveCollateral {
                    collateral_amount: unpack_args(rest)?,
                }
            }
            InstructionKind::UpdateReserveConfig => Self::UpdateReserveConfig {
                config: ReserveConfig::unpack_config(&unpack_args(rest)?),
            },
        })
    }

    /// Packs a [LendingInstruction] into a byte buffer.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(size_of::<Self>());
        buf.push(self.kind() as u8);
        match self {
            Self::InitLendingMarket {
                owner,
                quote_currency,
            } => {
                buf.extend_from_slice(owner.as_ref());
                buf.extend_from_slice(quote_currency);
            }
            Self::SetLendingMarketOwner { new_owner } => {
                buf.extend_from_slice(new_owner.as_ref());
            }
            Self::InitReserve {
                liquidity_amount,
                config,
            } => {
                buf.extend_from_slice(&liquidity_amount.to_le_bytes());
                buf.extend_from_slice(&pack_reserve_config(config));
            }
            Self::RefreshReserve | Self::InitObligation | Self::RefreshObligation => {}
            Self::DepositReserveLiquidity { liquidity_amount }
            | Self::BorrowObligationLiquidity { liquidity_amount }
            | Self::RepayObligationLiquidity { liquidity_amount }
            | Self::LiquidateObligation { liquidity_amount }
            | Self::DepositReserveLiquidityAndObligationCollateral { liquidity_amount } => {
                buf.extend_from_slice(&liquidity_amount.to_le_bytes());
            }
            Self::RedeemReserveCollateral { collateral_amount }
            | Self::DepositObligationCollateral { collateral_amount }
            | Self::WithdrawObligationCollateral { collateral_amount }
            | Self::WithdrawObligationCollateralAndRedeemReserveCollateral { collateral_amount } => {
                buf.extend_from_slice(&collateral_amount.to_le_bytes());
            }
            Self::FlashLoan { amount } => {
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            Self::UpdateReserveConfig { config } => {
                buf.extend_from_slice(&pack_reserve_config(config));
            }
        }
        buf
    }

    /// Named argument values, in wire order
    pub fn values(&self) -> Vec<(String, DecodedValue)> {
        let liquidity = |amount: &u64| ("Liquidity Amount".to_string(), DecodedValue::U64(*amount));
        let collateral =
            |amount: &u64| ("Collateral Amount".to_string(), DecodedValue::U64(*amount));
        let config = |config: &ReserveConfig| {
            (
                "Config".to_string(),
                DecodedValue::ReserveConfig(Box::new(*config)),
            )
        };

        match self {
            Self::InitLendingMarket {
                owner,
                quote_currency,
            } => vec![
                ("Owner".to_string(), DecodedValue::PublicKey(*owner)),
                (
                    "Quote Currency".to_string(),
                    DecodedValue::Bytes(quote_currency.to_vec()),
                ),
            ],
            Self::SetLendingMarketOwner { new_owner } => {
                vec![("New Owner".to_string(), DecodedValue::PublicKey(*new_owner))]
            }
            Self::InitReserve {
                liquidity_amount,
                config: reserve_config,
            } => vec![liquidity(liquidity_amount), config(reserve_config)],
            Self::RefreshReserve | Self::InitObligation | Self::RefreshObligation => vec![],
            Self::DepositReserveLiquidity { liquidity_amount }
            | Self::BorrowObligationLiquidity { liquidity_amount }
            | Self::RepayObligationLiquidity { liquidity_amount }
            | Self::LiquidateObligation { liquidity_amount }
            | Self::DepositReserveLiquidityAndObligationCollateral { liquidity_amount }
            | Self::FlashLoan {
                amount: liquidity_amount,
            } => vec![liquidity(liquidity_amount)],
            Self::RedeemReserveCollateral { collateral_amount }
            | Self::DepositObligationCollateral { collateral_amount }
            | Self::WithdrawObligationCollateral { collateral_amount }
            | Self::WithdrawObligationCollateralAndRedeemReserveCollateral { collateral_amount } => {
                vec![collateral(collateral_amount)]
            }
            Self::UpdateReserveConfig {
                config: reserve_config,
            } => vec![config(reserve_config)],
        }
    }
}

/// Read the leading arguments; bytes past them are ignored, as the program does
fn unpack_args<T: BorshDeserialize>(input: &[u8]) -> Result<T, LendingError> {
    let mut input = input;
    T::deserialize(&mut input).map_err(|_| LendingError::InvalidInstructionData)
}

fn pack_reserve_config(config: &ReserveConfig) -> [u8; RESERVE_CONFIG_LEN] {
    let mut data = [0u8; RESERVE_CONFIG_LEN];
    config.pack_config(&mut data);
    data
}

/// A value read from an instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedValue {
    PublicKey(Pubkey),
    U64(u64),
    Bytes(Vec<u8>),
    ReserveConfig(Box<ReserveConfig>),
}

impl DecodedValue {
    pub fn as_pubkey(&self) -> Option<&Pubkey> {
        match self {
            Self::PublicKey(pubkey) => Some(pubkey),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicKey(pubkey) => write!(f, "{}", pubkey),
            Self::U64(value) => write!(f, "{}", value),
            Self::Bytes(bytes) => bytes.iter().try_for_each(|byte| write!(f, "{:02x}", byte)),
            Self::ReserveConfig(config) => write!(f, "{:?}", config),
        }
    }
}

/// An instruction resolved against its transaction's account keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub program_id: Pubkey,
    pub program_name: String,
    pub instruction_name: String,
    /// Accounts first, then arguments
    pub values: Vec<(String, DecodedValue)>,
    pub inner_instructions: Vec<DecodedInstruction>,
}

impl DecodedInstruction {
    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Decode an instruction's data and name its accounts.
///
/// `keys` is the transaction's full account list and `key_indices` selects
/// this instruction's accounts from it, in program order.
pub fn decode_instruction(
    config: &ProgramConfig,
    data: &[u8],
    keys: &[Pubkey],
    key_indices: &[u8],
) -> Result<DecodedInstruction, LendingError> {
    let instruction = LendingInstruction::unpack(data)?;
    let kind = instruction.kind();
    let names = kind.account_names();
    if key_indices.len() < names.len() {
        return Err(LendingError::AccountIndexOutOfRange {
            index: key_indices.len(),
            len: key_indices.len(),
        });
    }

    let accounts = key_indices
        .iter()
        .map(|index| {
            keys.get(*index as usize)
                .copied()
                .ok_or(LendingError::AccountIndexOutOfRange {
                    index: *index as usize,
                    len: keys.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let (fixed, extra) = accounts.split_at(names.len());

    let mut values: Vec<(String, DecodedValue)> = names
        .iter()
        .zip(fixed)
        .map(|(name, key)| (name.to_string(), DecodedValue::PublicKey(*key)))
        .collect();

    let ignored = match kind.account_tail() {
        AccountTail::Numbered(prefix) => {
            values.extend(extra.iter().enumerate().map(|(i, key)| {
                (format!("{} {}", prefix, i + 1), DecodedValue::PublicKey(*key))
            }));
            0
        }
        AccountTail::Optional(name) => match extra.split_first() {
            Some((key, rest)) => {
                values.push((name.to_string(), DecodedValue::PublicKey(*key)));
                rest.len()
            }
            None => 0,
        },
        AccountTail::Ignored => extra.len(),
    };
    if ignored > 0 {
        debug!("Ignoring {} trailing accounts of {}", ignored, kind);
    }

    values.extend(instruction.values());
    trace!("Decoded {} instruction", kind);

    Ok(DecodedInstruction {
        program_id: config.program_id,
        program_name: config.program_name.clone(),
        instruction_name: kind.name().to_string(),
        values,
        inner_instructions: Vec::new(),
    })
}

fn lending_market_authority(lending_market: &Pubkey, program_id: &Pubkey) -> Pubkey {
    find_lending_market_authority(lending_market, program_id).0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::state::ReserveFees;
    use proptest::prelude::*;

    fn config() -> ProgramConfig {
        ProgramConfig::new(Pubkey::new_unique())
    }

    fn pubkey_at(decoded: &DecodedInstruction, name: &str) -> Pubkey {
        *decoded.get(name).unwrap().as_pubkey().unwrap()
    }

    fn reserve_config() -> ReserveConfig {
        ReserveConfig {
            optimal_utilization_rate: 80,
            loan_to_value_ratio: 75,
            liquidation_bonus: 5,
            liquidation_threshold: 80,
            min_borrow_rate: 0,
            optimal_borrow_rate: 8,
            max_borrow_rate: 100,
            fees: ReserveFees {
                borrow_fee_wad: 100_000_000_000_000,
                flash_loan_fee_wad: 3_000_000_000_000_000,
                host_fee_percentage: 20,
            },
            deposit_limit: u64::MAX,
            borrow_limit: u64::MAX,
            fee_receiver: Pubkey::new_unique(),
        }
    }

    #[test]
    fn amount_follows_opcode() {
        let data = LendingInstruction::DepositReserveLiquidity {
            liquidity_amount: 1_000_000_000,
        }
        .pack();
        assert_eq!(data.len(), 9);
        assert_eq!(data[0], 4);
        assert_eq!(data[1..9], 1_000_000_000u64.to_le_bytes());
    }

    #[test]
    fn argumentless_instructions_are_one_byte() {
        assert_eq!(LendingInstruction::RefreshReserve.pack(), vec![3]);
        assert_eq!(LendingInstruction::InitObligation.pack(), vec![6]);
        assert_eq!(LendingInstruction::RefreshObligation.pack(), vec![7]);
    }

    #[test]
    fn combined_withdraw_uses_its_own_opcode() {
        let data = LendingInstruction::WithdrawObligationCollateralAndRedeemReserveCollateral {
            collateral_amount: 5,
        }
        .pack();
        assert_eq!(data[0], 15);
        assert_eq!(
            LendingInstruction::unpack(&data).unwrap().kind(),
            InstructionKind::WithdrawObligationCollateralAndRedeemReserveCollateral
        );
    }

    #[test]
    fn reserve_config_payload() {
        let instruction = LendingInstruction::InitReserve {
            liquidity_amount: 42,
            config: reserve_config(),
        };
        let data = instruction.pack();
        assert_eq!(data.len(), 1 + 8 + RESERVE_CONFIG_LEN);
        assert_eq!(data[0], 2);
        assert_eq!(data[9], 80);
        assert_eq!(LendingInstruction::unpack(&data).unwrap(), instruction);

        let update = LendingInstruction::UpdateReserveConfig {
            config: reserve_config(),
        };
        assert_eq!(update.pack()[1..], data[9..]);
    }

    #[test]
    fn unpack_rejects_malformed_data() {
        assert_eq!(
            LendingInstruction::unpack(&[]),
            Err(LendingError::InvalidInstructionData)
        );
        assert_eq!(
            LendingInstruction::unpack(&[17]),
            Err(LendingError::UnknownInstruction(17))
        );
        assert_eq!(
            LendingInstruction::unpack(&[4, 1, 2, 3]),
            Err(LendingError::InvalidInstructionData)
        );
        assert_eq!(
            LendingInstruction::unpack(&[10, 0, 0, 0, 0, 0, 0, 0]),
            Err(LendingError::InvalidInstructionData)
        );
    }

    #[test]
    fn unpack_ignores_bytes_past_the_arguments() {
        assert_eq!(
            LendingInstruction::unpack(&[3, 0]),
            Ok(LendingInstruction::RefreshReserve)
        );
        let mut data = LendingInstruction::FlashLoan { amount: 1 }.pack();
        data.extend_from_slice(&[7, 7]);
        assert_eq!(
            LendingInstruction::unpack(&data),
            Ok(LendingInstruction::FlashLoan { amount: 1 })
        );

        let keys: Vec<Pubkey> = (0..10).map(|_| Pubkey::new_unique()).collect();
        let indices: Vec<u8> = (0..10).collect();
        let mut data = LendingInstruction::DepositReserveLiquidity {
            liquidity_amount: 42,
        }
        .pack();
        data.push(1);
        let decoded = decode_instruction(&config(), &data, &keys, &indices).unwrap();
        assert_eq!(decoded.get("Liquidity Amount"), Some(&DecodedValue::U64(42)));
    }

    #[test]
    fn refresh_obligation_numbers_reserves() {
        let keys: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let decoded =
            decode_instruction(&config(), &[7], &keys, &[0, 1, 2, 3]).unwrap();

        assert_eq!(decoded.instruction_name, "Refresh Obligation");
        assert_eq!(decoded.program_name, "Solend Program");
        let names: Vec<&str> = decoded.values.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Obligation", "Sysvar Clock", "Reserve 1", "Reserve 2"]);
        assert_eq!(pubkey_at(&decoded, "Reserve 2"), keys[3]);
    }

    #[test]
    fn indices_select_from_transaction_keys() {
        let keys: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
        let data = LendingInstruction::RefreshReserve.pack();
        let decoded = decode_instruction(&config(), &data, &keys, &[4, 2, 0]).unwrap();

        assert_eq!(pubkey_at(&decoded, "Reserve"), keys[4]);
        assert_eq!(pubkey_at(&decoded, "Reserve Liquidity Oracle"), keys[2]);
        assert_eq!(pubkey_at(&decoded, "Sysvar Clock"), keys[0]);
    }

    #[test]
    fn deposit_decodes_amount_after_accounts() {
        let keys: Vec<Pubkey> = (0..10).map(|_| Pubkey::new_unique()).collect();
        let indices: Vec<u8> = (0..10).collect();
        let data = LendingInstruction::DepositReserveLiquidity {
            liquidity_amount: 1_000_000_000,
        }
        .pack();
        let decoded = decode_instruction(&config(), &data, &keys, &indices).unwrap();

        assert_eq!(decoded.values.len(), 11);
        assert_eq!(decoded.values[0].0, "Source Liquidity");
        assert_eq!(decoded.values[10].0, "Liquidity Amount");
        assert_eq!(
            decoded.get("Liquidity Amount").unwrap().to_string(),
            "1000000000"
        );
        assert_eq!(pubkey_at(&decoded, "Token Program"), keys[9]);
    }

    #[test]
    fn borrow_host_fee_receiver_is_optional() {
        let keys: Vec<Pubkey> = (0..12).map(|_| Pubkey::new_unique()).collect();
        let data = LendingInstruction::BorrowObligationLiquidity {
            liquidity_amount: 10,
        }
        .pack();

        let without: Vec<u8> = (0..10).collect();
        let decoded = decode_instruction(&config(), &data, &keys, &without).unwrap();
        assert!(decoded.get("Host Fee Receiver").is_none());

        let with: Vec<u8> = (0..11).collect();
        let decoded = decode_instruction(&config(), &data, &keys, &with).unwrap();
        assert_eq!(pubkey_at(&decoded, "Host Fee Receiver"), keys[10]);
        assert_eq!(decoded.get("Liquidity Amount").unwrap().as_u64(), Some(10));

        let extra: Vec<u8> = (0..12).collect();
        let decoded = decode_instruction(&config(), &data, &keys, &extra).unwrap();
        assert_eq!(decoded.values.len(), 12);
    }

    #[test]
    fn flash_loan_numbers_receiver_accounts() {
        let keys: Vec<Pubkey> = (0..11).map(|_| Pubkey::new_unique()).collect();
        let indices: Vec<u8> = (0..11).collect();
        let data = LendingInstruction::FlashLoan { amount: 7 }.pack();
        let decoded = decode_instruction(&config(), &data, &keys, &indices).unwrap();

        assert_eq!(pubkey_at(&decoded, "Flash Loan Receiver Program"), keys[8]);
        assert_eq!(pubkey_at(&decoded, "Flash Loan Receiver Account 1"), keys[9]);
        assert_eq!(pubkey_at(&decoded, "Flash Loan Receiver Account 2"), keys[10]);
    }

    #[test]
    fn too_few_accounts_is_an_error() {
        let keys: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let data = LendingInstruction::RepayObligationLiquidity {
            liquidity_amount: 1,
        }
        .pack();
        assert_eq!(
            decode_instruction(&config(), &data, &keys, &[0, 1, 2]),
            Err(LendingError::AccountIndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            decode_instruction(&config(), &[7], &keys, &[0, 9]),
            Err(LendingError::AccountIndexOutOfRange { index: 9, len: 3 })
        );
    }

    #[test]
    fn unknown_opcode_is_an_error() {
        let keys = vec![Pubkey::new_unique()];
        assert_eq!(
            decode_instruction(&config(), &[200, 0], &keys, &[0]),
            Err(LendingError::UnknownInstruction(200))
        );
    }

    #[test]
    fn every_opcode_has_a_name_and_accounts() {
        for opcode in 0..=16u8 {
            let kind = InstructionKind::from_opcode(opcode).unwrap();
            assert_eq!(kind as u8, opcode);
            assert!(!kind.name().is_empty());
            assert!(!kind.account_names().is_empty());
        }
        assert_eq!(
            InstructionKind::from_opcode(17),
            Err(LendingError::UnknownInstruction(17))
        );
    }

    proptest! {
        #[test]
        fn decode_never_panics(
            data in proptest::collection::vec(any::<u8>(), 0..100),
            indices in proptest::collection::vec(any::<u8>(), 0..20),
        ) {
            let keys: Vec<Pubkey> = (0..8).map(|_| Pubkey::new_unique()).collect();
            let _ = decode_instruction(&config(), &data, &keys, &indices);
        }

        #[test]
        fn amount_instructions_keep_their_amount(opcode in 4u8..=15, amount in any::<u64>()) {
            prop_assume!(![6u8, 7].contains(&opcode));
            let mut data = vec![opcode];
            data.extend_from_slice(&amount.to_le_bytes());

            let instruction = LendingInstruction::unpack(&data)?;
            prop_assert_eq!(instruction.kind() as u8, opcode);
            prop_assert_eq!(instruction.pack(), data);
        }
    }
}
