use std::collections::BTreeMap;

use anchor_lang::prelude::*;

/// A single ledger entry: balance, owning program and raw data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerAccount {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl LedgerAccount {
    /// A data-less account owned by the system program.
    pub fn system(lamports: u64) -> Self {
        Self {
            lamports,
            owner: anchor_lang::system_program::ID,
            data: Vec::new(),
        }
    }

    /// Zero-lamport system accounts without data are reclaimed by the runtime.
    pub fn is_reclaimable(&self) -> bool {
        self.lamports == 0 && self.data.is_empty() && self.owner == anchor_lang::system_program::ID
    }
}

/// Account database consulted and mutated by the ledger.
pub trait AccountStore {
    fn get(&self, address: &Pubkey) -> Option<LedgerAccount>;
    fn put(&mut self, address: Pubkey, account: LedgerAccount);
    fn delete(&mut self, address: &Pubkey);
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    accounts: BTreeMap<Pubkey, LedgerAccount>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for InMemoryStore {
    fn get(&self, address: &Pubkey) -> Option<LedgerAccount> {
        self.accounts.get(address).cloned()
    }

    fn put(&mut self, address: Pubkey, account: LedgerAccount) {
        self.accounts.insert(address, account);
    }

    fn delete(&mut self, address: &Pubkey) {
        self.accounts.remove(address);
    }
}
