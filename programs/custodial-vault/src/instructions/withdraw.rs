use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::VAULT_SEED;
use crate::events::VaultWithdrawn;
use crate::instructions::load_vault_state;
use crate::invariants;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub controller: Signer<'info>,

    /// CHECK: decoded and re-derived from its stored controller in
    /// `load_vault_state`.
    pub vault_state: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        let state = load_vault_state(
            &self.vault_state.to_account_info(),
            self.vault.key,
            self.controller.key,
        )?;

        let reserve_floor =
            Rent::get()?.minimum_balance(self.vault.to_account_info().data_len());
        let balance =
            invariants::balance_after_withdraw(self.vault.lamports(), amount, reserve_floor)?;

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
            amount,
        )?;

        msg!("Withdrew {} lamports, vault balance {}", amount, balance);
        emit!(VaultWithdrawn {
            controller: self.controller.key(),
            amount,
            balance,
        });
        Ok(())
    }
}
