//! Balance arithmetic for vault transitions.
//!
//! Every function is pure and checked: it either returns the balance the
//! vault will hold after the transition or the error that rejects it. Both
//! the on-chain handlers and the host ledger run through here, so the two
//! can never disagree about which transitions are legal.

use crate::error::VaultError;

pub type BalanceResult<T> = std::result::Result<T, VaultError>;

/// The payer must hold at least `amount` lamports.
pub fn ensure_affordable(available: u64, amount: u64) -> BalanceResult<()> {
    if available < amount {
        return Err(VaultError::InsufficientFunds);
    }
    Ok(())
}

/// Vault balance after depositing `amount`.
pub fn balance_after_deposit(balance: u64, amount: u64) -> BalanceResult<u64> {
    if amount == 0 {
        return Err(VaultError::InvalidAmount);
    }
    balance.checked_add(amount).ok_or(VaultError::InvalidAmount)
}

/// Vault balance after withdrawing `amount`.
///
/// Checks run in a fixed order and the first failure wins:
/// zero amount, amount above the balance, then the rent-exempt floor.
pub fn balance_after_withdraw(balance: u64, amount: u64, reserve_floor: u64) -> BalanceResult<u64> {
    if amount == 0 {
        return Err(VaultError::InvalidAmount);
    }
    let remaining = balance
        .checked_sub(amount)
        .ok_or(VaultError::InsufficientVaultBalance)?;
    if remaining < reserve_floor {
        return Err(VaultError::BelowRentExemption);
    }
    Ok(remaining)
}

/// Lamports still missing before `balance` reaches `target`. Stray lamports
/// already sitting at an address count toward its reserve.
pub fn top_up(balance: u64, target: u64) -> u64 {
    target.saturating_sub(balance)
}

/// Lamports returned to the controller when the vault and its state close.
pub fn closing_refund(vault_balance: u64, state_balance: u64) -> BalanceResult<u64> {
    vault_balance
        .checked_add(state_balance)
        .ok_or(VaultError::InvalidAmount)
}
