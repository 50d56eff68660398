use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
};

use crate::constants::{STATE_SEED, VAULT_SEED};
use crate::error::VaultError;
use crate::events::VaultInitialized;
use crate::invariants;
use crate::state::VaultState;

// ---------------------------------------------------------------------------
// Initialize Vault
// ---------------------------------------------------------------------------
// Creates the VaultState PDA for the controller and tops the vault PDA up to
// its rent-exempt minimum, so the vault is alive from the start.
//
// Both addresses are predictable, so anyone can send them lamports first.
// Stray lamports on a data-less system account are absorbed rather than
// treated as an existing vault.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub controller: Signer<'info>,

    /// CHECK: PDA checked by seeds; created in the handler so an existing
    /// record is reported as `AlreadyInitialized`.
    #[account(
        mut,
        seeds = [STATE_SEED, controller.key().as_ref()],
        bump
    )]
    pub vault_state: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, bumps: &InitializeBumps) -> Result<()> {
        require!(
            self.vault_state.data_is_empty()
                && self.vault_state.owner == &anchor_lang::system_program::ID,
            VaultError::AlreadyInitialized
        );

        let rent = Rent::get()?;
        let state_reserve = rent.minimum_balance(VaultState::SPACE);
        let reserve_floor = rent.minimum_balance(self.vault.to_account_info().data_len());

        let state_top_up = invariants::top_up(self.vault_state.lamports(), state_reserve);
        let vault_top_up = invariants::top_up(self.vault.lamports(), reserve_floor);
        let required = state_top_up
            .checked_add(vault_top_up)
            .ok_or(VaultError::InvalidAmount)?;
        invariants::ensure_affordable(self.controller.lamports(), required)?;

        self.create_state(bumps.vault_state, state_reserve, state_top_up)?;

        let data = VaultState {
            controller: self.controller.key(),
            state_bump: bumps.vault_state,
            vault_bump: bumps.vault,
        }
        .encode()?;
        self.vault_state
            .try_borrow_mut_data()?
            .copy_from_slice(&data);

        if vault_top_up > 0 {
            self.pay(self.vault.to_account_info(), vault_top_up)?;
        }

        msg!(
            "Vault {} initialized for {} with floor {}",
            self.vault.key(),
            self.controller.key(),
            reserve_floor
        );
        emit!(VaultInitialized {
            controller: self.controller.key(),
            vault: self.vault.key(),
            reserve_floor,
        });
        Ok(())
    }

    /// Same path as Anchor's `init`: `create_account` for an empty address,
    /// otherwise top up, allocate and assign.
    fn create_state(&self, bump: u8, state_reserve: u64, top_up: u64) -> Result<()> {
        let controller_key = self.controller.key();
        let seeds = &[STATE_SEED, controller_key.as_ref(), &[bump]];
        let signer_seeds = &[&seeds[..]];
        let space = VaultState::SPACE as u64;

        if self.vault_state.lamports() == 0 {
            return create_account(
                CpiContext::new_with_signer(
                    self.system_program.to_account_info(),
                    CreateAccount {
                        from: self.controller.to_account_info(),
                        to: self.vault_state.to_account_info(),
                    },
                    signer_seeds,
                ),
                state_reserve,
                space,
                &crate::ID,
            );
        }

        if top_up > 0 {
            self.pay(self.vault_state.to_account_info(), top_up)?;
        }
        allocate(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Allocate {
                    account_to_allocate: self.vault_state.to_account_info(),
                },
                signer_seeds,
            ),
            space,
        )?;
        assign(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Assign {
                    account_to_assign: self.vault_state.to_account_info(),
                },
                signer_seeds,
            ),
            &crate::ID,
        )
    }

    fn pay(&self, to: AccountInfo<'info>, amount: u64) -> Result<()> {
        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.controller.to_account_info(),
                    to,
                },
            ),
            amount,
        )
    }
}
