use anchor_lang::prelude::*;

use crate::state::VaultState;

/// Platform rent parameters the ledger enforces.
///
/// `reserve_floor` is what the vault (a zero-data system account) must keep
/// to stay allocated; `state_reserve` is what the VaultState record costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultConfig {
    pub reserve_floor: u64,
    pub state_reserve: u64,
}

impl VaultConfig {
    pub fn from_rent(rent: &Rent) -> Self {
        Self {
            reserve_floor: rent.minimum_balance(0),
            state_reserve: rent.minimum_balance(VaultState::SPACE),
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::from_rent(&Rent::default())
    }
}
