//! Deterministic PDA derivation for VaultState and vault addresses.
//!
//! Pure functions of (tag, seed material, program id). Nothing here reads
//! account state, so any client can reproduce the addresses before
//! submitting an instruction.

use anchor_lang::prelude::*;

use crate::constants::{STATE_SEED, VAULT_SEED};
use crate::error::VaultError;

/// Find the canonical (highest off-curve) bump for `[tag, seed]`.
pub fn derive(
    tag: &[u8],
    seed: &[u8],
    program_id: &Pubkey,
) -> std::result::Result<(Pubkey, u8), VaultError> {
    Pubkey::try_find_program_address(&[tag, seed], program_id).ok_or(VaultError::NoViableBump)
}

/// Re-create the address for `[tag, seed, bump]` and compare it to `expected`.
pub fn verify(
    tag: &[u8],
    seed: &[u8],
    bump: u8,
    program_id: &Pubkey,
    expected: &Pubkey,
) -> std::result::Result<(), VaultError> {
    let address = Pubkey::create_program_address(&[tag, seed, &[bump]], program_id)
        .map_err(|_| VaultError::AddressMismatch)?;
    if address != *expected {
        return Err(VaultError::AddressMismatch);
    }
    Ok(())
}

pub fn vault_state_address(
    controller: &Pubkey,
    program_id: &Pubkey,
) -> std::result::Result<(Pubkey, u8), VaultError> {
    derive(STATE_SEED, controller.as_ref(), program_id)
}

pub fn vault_address(
    vault_state: &Pubkey,
    program_id: &Pubkey,
) -> std::result::Result<(Pubkey, u8), VaultError> {
    derive(VAULT_SEED, vault_state.as_ref(), program_id)
}
