//! Client library for the Solend lending program: account layouts,
//! interest rate and obligation health calculations, and instruction
//! encoding and decoding.

pub mod config;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;

// Export current sdk types for downstream users building with a different sdk version
pub use solana_program;
