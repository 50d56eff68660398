use anchor_lang::prelude::*;

use crate::error::VaultError;
use crate::state::VaultState;

pub mod close;
pub mod deposit;
pub mod initialize;
pub mod withdraw;

pub use close::*;
pub use deposit::*;
pub use initialize::*;
pub use withdraw::*;

/// Load the VaultState behind `vault_state` and authorize `signer` for it.
///
/// The record is read by hand instead of through `Account<VaultState>` so a
/// missing vault surfaces as `NotInitialized` rather than Anchor's own
/// account-loading error.
pub(crate) fn load_vault_state(
    vault_state: &AccountInfo,
    vault: &Pubkey,
    signer: &Pubkey,
) -> Result<VaultState> {
    require!(
        vault_state.owner == &crate::ID && !vault_state.data_is_empty(),
        VaultError::NotInitialized
    );
    let state = VaultState::decode(&vault_state.try_borrow_data()?)?;
    state.authorize(vault_state.key, vault, signer, &crate::ID)?;
    Ok(state)
}
