use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use super::store::{AccountStore, LedgerAccount};
use super::LedgerResult;
use crate::error::VaultError;

// ---------------------------------------------------------------------------
// Changeset
// ---------------------------------------------------------------------------
// Staged writes over a store. Reads see staged values first. Nothing reaches
// the store until `commit`; dropping the changeset discards every write.
// ---------------------------------------------------------------------------

pub struct Changeset<'a, S: AccountStore> {
    store: &'a mut S,
    staged: BTreeMap<Pubkey, Option<LedgerAccount>>,
}

impl<'a, S: AccountStore> Changeset<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            staged: BTreeMap::new(),
        }
    }

    pub fn get(&self, address: &Pubkey) -> Option<LedgerAccount> {
        match self.staged.get(address) {
            Some(staged) => staged.clone(),
            None => self.store.get(address),
        }
    }

    /// Balance of `address`; a missing account holds nothing.
    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.get(address).map_or(0, |account| account.lamports)
    }

    pub fn put(&mut self, address: Pubkey, account: LedgerAccount) {
        self.staged.insert(address, Some(account));
    }

    pub fn delete(&mut self, address: &Pubkey) {
        self.staged.insert(*address, None);
    }

    /// Move lamports between two accounts, creating `to` as a system
    /// account if it does not exist yet.
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> LedgerResult<()> {
        let mut source = self.get(from).ok_or(VaultError::InsufficientFunds)?;
        source.lamports = source
            .lamports
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientFunds)?;
        self.put(*from, source);

        let mut destination = self.get(to).unwrap_or_else(|| LedgerAccount::system(0));
        destination.lamports = destination
            .lamports
            .checked_add(amount)
            .ok_or(VaultError::InvalidAmount)?;
        self.put(*to, destination);
        Ok(())
    }

    /// Apply every staged write. Drained system accounts are dropped the way
    /// the runtime reclaims them at the end of a transaction.
    pub fn commit(self) -> usize {
        let applied = self.staged.len();
        for (address, staged) in self.staged {
            match staged {
                Some(account) if !account.is_reclaimable() => self.store.put(address, account),
                _ => self.store.delete(&address),
            }
        }
        applied
    }
}
