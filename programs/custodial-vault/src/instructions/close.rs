use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::VAULT_SEED;
use crate::events::VaultClosed;
use crate::instructions::load_vault_state;
use crate::invariants;

// ---------------------------------------------------------------------------
// Close Vault
// ---------------------------------------------------------------------------
// Drains the vault, floor included, so the runtime reclaims the system
// account, then closes the VaultState the way Anchor's `close` constraint
// does: lamports to the controller, data zeroed, owner back to the system
// program. A second close therefore sees `NotInitialized`.
// ---------------------------------------------------------------------------

#[derive(Accounts)]
pub struct Close<'info> {
    #[account(mut)]
    pub controller: Signer<'info>,

    /// CHECK: decoded and re-derived from its stored controller in
    /// `load_vault_state`.
    #[account(mut)]
    pub vault_state: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Close<'info> {
    pub fn close(&mut self) -> Result<()> {
        let state_info = self.vault_state.to_account_info();
        let state = load_vault_state(&state_info, self.vault.key, self.controller.key)?;

        let drained = self.vault.lamports();
        let state_lamports = state_info.lamports();
        let refunded = invariants::closing_refund(drained, state_lamports)?;

        let state_key = self.vault_state.key();
        let seeds = &[VAULT_SEED, state_key.as_ref(), &[state.vault_bump]];
        let signer_seeds = &[&seeds[..]];

        transfer(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.vault.to_account_info(),
                    to: self.controller.to_account_info(),
                },
                signer_seeds,
            ),
            drained,
        )?;

        state_info.sub_lamports(state_lamports)?;
        self.controller.add_lamports(state_lamports)?;
        state_info.try_borrow_mut_data()?.fill(0);
        state_info.assign(&anchor_lang::system_program::ID);
        state_info.resize(0)?;

        msg!("Vault closed, {} lamports returned to {}", refunded, self.controller.key());
        emit!(VaultClosed {
            controller: self.controller.key(),
            refunded,
        });
        Ok(())
    }
}
