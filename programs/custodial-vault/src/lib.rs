//! Custodial Vault - Anchor Program
//!
//! A single controller parks lamports in a program-derived system account.
//! The vault never drops below the rent-exempt floor unless it is closed, and
//! only the controller recorded in the VaultState can move funds.
//!
//! Accounts:
//! - VaultState: `[b"state", controller]`, stores the controller and both bumps.
//! - Vault: `[b"vault", vault_state]`, a system account holding the balance.

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod derivation;
pub mod error;
pub mod events;
pub mod instructions;
pub mod invariants;
pub mod state;

#[cfg(not(target_os = "solana"))]
pub mod ledger;

pub use instructions::*;

declare_id!("DiMqm3RDApWfShvSUBTprHXWw2TMWrgJtpgBCBKeumci");

#[program]
pub mod custodial_vault {
    use super::*;

    /// Create the VaultState and fund the vault with its rent-exempt floor.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        ctx.accounts.initialize(&ctx.bumps)
    }

    /// Move `amount` lamports from the controller into the vault.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        ctx.accounts.deposit(amount)
    }

    /// Move `amount` lamports from the vault back to the controller.
    /// Rejected if the vault would fall below its rent-exempt floor.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw(amount)
    }

    /// Drain the vault (floor included) and close the VaultState.
    pub fn close(ctx: Context<Close>) -> Result<()> {
        ctx.accounts.close()
    }
}
