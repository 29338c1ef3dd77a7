//! Error types

use solana_program::pubkey::Pubkey;
use thiserror::Error;

/// Errors that may be returned while decoding accounts, computing metrics
/// or encoding instructions
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LendingError {
    /// Buffer length differs from the record's fixed length
    #[error("Account data has wrong size. Expected {expected} bytes, actual {actual} bytes")]
    SizeMismatch {
        /// Fixed length of the record
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Opcode outside of the known instruction set
    #[error("Unknown instruction opcode {0}")]
    UnknownInstruction(u8),

    /// Instruction references an account index that was not supplied
    #[error("Account index {index} out of range, {len} available")]
    AccountIndexOutOfRange {
        /// Offending position
        index: usize,
        /// Number of entries that were available
        len: usize,
    },

    /// Instruction argument payload is truncated or has trailing bytes
    #[error("Invalid instruction data")]
    InvalidInstructionData,

    /// Obligation entry counts run past the end of the account
    #[error("Obligation holds {deposits} deposits and {borrows} borrows, which exceeds its data region")]
    InvalidObligationEntries {
        /// Declared deposit count
        deposits: u8,
        /// Declared borrow count
        borrows: u8,
    },

    /// Boolean flag stored as something other than 0 or 1
    #[error("Invalid boolean byte {0}")]
    InvalidBool(u8),

    /// Ratio with a zero denominator
    #[error("Ratio is undefined for a zero denominator")]
    UndefinedRatio,

    /// Fees would consume the whole amount
    #[error("Amount is too small to cover fees")]
    BorrowTooSmall,

    /// Math operation overflow
    #[error("Math operation overflow")]
    MathOverflow,

    /// Obligation leg points at a reserve that was not supplied
    #[error("Reserve {0} referenced by the obligation was not supplied")]
    MissingReserveAccount(Pubkey),
}
