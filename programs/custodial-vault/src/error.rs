//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum VaultError {
    #[msg("Vault already initialized for this controller")]
    AlreadyInitialized,
    #[msg("Vault not initialized")]
    NotInitialized,
    #[msg("Unauthorized: caller is not the vault controller")]
    Unauthorized,
    #[msg("Amount must be greater than zero and fit the vault balance")]
    InvalidAmount,
    #[msg("Controller balance cannot cover the transfer")]
    InsufficientFunds,
    #[msg("Withdraw amount exceeds total vault lamports")]
    InsufficientVaultBalance,
    #[msg("Withdraw would violate rent-exemption requirements")]
    BelowRentExemption,
    #[msg("Supplied account does not match its derived address")]
    AddressMismatch,
    #[msg("No off-curve bump found for the supplied seeds")]
    NoViableBump,
    #[msg("Vault state data could not be encoded or decoded")]
    InvalidStateData,
}
