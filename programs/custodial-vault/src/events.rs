use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub controller: Pubkey,
    pub vault: Pubkey,
    pub reserve_floor: u64,
}

#[event]
pub struct VaultDeposited {
    pub controller: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

#[event]
pub struct VaultWithdrawn {
    pub controller: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

#[event]
pub struct VaultClosed {
    pub controller: Pubkey,
    pub refunded: u64,
}
