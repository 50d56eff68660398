use anchor_lang::prelude::*;

use crate::constants::{DISCRIMINATOR_LEN, STATE_SEED, VAULT_SEED};
use crate::derivation;
use crate::error::VaultError;

// ---------------------------------------------------------------------------
// Vault State
// ---------------------------------------------------------------------------
// Anchors a vault to its controller. Written once by `initialize`, never
// mutated afterwards, closed together with the vault by `close`.
// ---------------------------------------------------------------------------

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct VaultState {
    /// The only identity allowed to deposit, withdraw or close.
    pub controller: Pubkey,
    /// Canonical bump of this record's PDA.
    pub state_bump: u8,
    /// Canonical bump of the vault PDA derived from this record.
    pub vault_bump: u8,
}

impl VaultState {
    pub const SPACE: usize = DISCRIMINATOR_LEN + Self::INIT_SPACE;

    /// Discriminator-checked decode of a stored record.
    pub fn decode(mut data: &[u8]) -> std::result::Result<Self, VaultError> {
        Self::try_deserialize(&mut data).map_err(|_| VaultError::InvalidStateData)
    }

    pub fn encode(&self) -> std::result::Result<Vec<u8>, VaultError> {
        let mut data = Vec::with_capacity(Self::SPACE);
        self.try_serialize(&mut data)
            .map_err(|_| VaultError::InvalidStateData)?;
        Ok(data)
    }

    /// Both addresses must re-derive from the stored controller and bumps,
    /// and the signer must be that controller.
    pub fn authorize(
        &self,
        vault_state: &Pubkey,
        vault: &Pubkey,
        signer: &Pubkey,
        program_id: &Pubkey,
    ) -> std::result::Result<(), VaultError> {
        derivation::verify(
            STATE_SEED,
            self.controller.as_ref(),
            self.state_bump,
            program_id,
            vault_state,
        )?;
        derivation::verify(
            VAULT_SEED,
            vault_state.as_ref(),
            self.vault_bump,
            program_id,
            vault,
        )?;
        if self.controller != *signer {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }
}
