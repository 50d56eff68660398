use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::events::VaultDeposited;
use crate::instructions::load_vault_state;
use crate::invariants;

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub controller: Signer<'info>,

    /// CHECK: decoded and re-derived from its stored controller in
    /// `load_vault_state`.
    pub vault_state: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        load_vault_state(
            &self.vault_state.to_account_info(),
            self.vault.key,
            self.controller.key,
        )?;

        let balance = invariants::balance_after_deposit(self.vault.lamports(), amount)?;
        invariants::ensure_affordable(self.controller.lamports(), amount)?;

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.controller.to_account_info(),
                    to: self.vault.to_account_info(),
                },
            ),
            amount,
        )?;

        msg!("Deposited {} lamports, vault balance {}", amount, balance);
        emit!(VaultDeposited {
            controller: self.controller.key(),
            amount,
            balance,
        });
        Ok(())
    }
}
