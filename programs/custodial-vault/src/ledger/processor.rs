use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};
use solana_hash::Hash;

use super::changeset::Changeset;
use super::config::VaultConfig;
use super::store::{AccountStore, LedgerAccount};
use super::LedgerResult;
use crate::derivation;
use crate::error::VaultError;
use crate::invariants;
use crate::state::VaultState;

/// Identifier handed back for every committed operation.
pub type TransactionId = Hash;

/// The three accounts every vault instruction names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultAccounts {
    /// The signer. The ledger treats it as already authenticated.
    pub controller: Pubkey,
    pub vault_state: Pubkey,
    pub vault: Pubkey,
}

impl VaultAccounts {
    /// Derive the VaultState and vault addresses for `controller`.
    pub fn derive(controller: Pubkey, program_id: &Pubkey) -> LedgerResult<Self> {
        let (vault_state, _) = derivation::vault_state_address(&controller, program_id)?;
        let (vault, _) = derivation::vault_address(&vault_state, program_id)?;
        Ok(Self {
            controller,
            vault_state,
            vault,
        })
    }
}

/// Runs vault operations against an injected account store.
///
/// Each operation stages its writes in a [`Changeset`] and commits only when
/// every check has passed, so a rejected call leaves the store untouched.
pub struct VaultLedger<S: AccountStore> {
    store: S,
    program_id: Pubkey,
    config: VaultConfig,
    sequence: u64,
}

impl<S: AccountStore> VaultLedger<S> {
    pub fn new(store: S, program_id: Pubkey, config: VaultConfig) -> Self {
        Self {
            store,
            program_id,
            config,
            sequence: 0,
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn account(&self, address: &Pubkey) -> Option<LedgerAccount> {
        self.store.get(address)
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.store.get(address).map_or(0, |account| account.lamports)
    }

    /// Decoded VaultState at `address`, if one exists there.
    pub fn vault_state(&self, address: &Pubkey) -> Option<VaultState> {
        self.store
            .get(address)
            .filter(|account| account.owner == self.program_id)
            .and_then(|account| VaultState::decode(&account.data).ok())
    }

    /// Credit `address` out of thin air, creating it if needed.
    pub fn airdrop(&mut self, address: &Pubkey, lamports: u64) -> LedgerResult<()> {
        let mut account = self
            .store
            .get(address)
            .unwrap_or_else(|| LedgerAccount::system(0));
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(VaultError::InvalidAmount)?;
        self.store.put(*address, account);
        Ok(())
    }

    pub fn initialize(&mut self, accounts: &VaultAccounts) -> LedgerResult<TransactionId> {
        let program_id = self.program_id;
        let config = self.config;

        self.execute("initialize", &accounts.controller, |changes| {
            let (state_address, state_bump) =
                derivation::vault_state_address(&accounts.controller, &program_id)?;
            let (vault_address, vault_bump) =
                derivation::vault_address(&state_address, &program_id)?;
            if state_address != accounts.vault_state || vault_address != accounts.vault {
                return Err(VaultError::AddressMismatch);
            }
            // Stray lamports on a data-less system account do not make a vault.
            let state = changes.get(&state_address);
            if state.as_ref().is_some_and(|account| {
                account.owner != anchor_lang::system_program::ID || !account.data.is_empty()
            }) {
                return Err(VaultError::AlreadyInitialized);
            }
            let state_lamports = state.map_or(0, |account| account.lamports);

            let state_top_up = invariants::top_up(state_lamports, config.state_reserve);
            let vault_top_up =
                invariants::top_up(changes.lamports(&vault_address), config.reserve_floor);
            let required = state_top_up
                .checked_add(vault_top_up)
                .ok_or(VaultError::InvalidAmount)?;
            invariants::ensure_affordable(changes.lamports(&accounts.controller), required)?;

            let data = VaultState {
                controller: accounts.controller,
                state_bump,
                vault_bump,
            }
            .encode()?;
            changes.put(
                state_address,
                LedgerAccount {
                    lamports: state_lamports,
                    owner: program_id,
                    data,
                },
            );
            if state_top_up > 0 {
                changes.transfer(&accounts.controller, &state_address, state_top_up)?;
            }
            if vault_top_up > 0 {
                changes.transfer(&accounts.controller, &vault_address, vault_top_up)?;
            }

            msg!(
                "Vault {} initialized for {} with floor {}",
                vault_address,
                accounts.controller,
                config.reserve_floor
            );
            Ok(())
        })
    }

    pub fn deposit(&mut self, accounts: &VaultAccounts, amount: u64) -> LedgerResult<TransactionId> {
        let program_id = self.program_id;

        self.execute("deposit", &accounts.controller, |changes| {
            load_vault(changes, accounts, &program_id)?;
            let balance = invariants::balance_after_deposit(changes.lamports(&accounts.vault), amount)?;
            invariants::ensure_affordable(changes.lamports(&accounts.controller), amount)?;

            changes.transfer(&accounts.controller, &accounts.vault, amount)?;
            msg!("Deposited {} lamports, vault balance {}", amount, balance);
            Ok(())
        })
    }

    pub fn withdraw(&mut self, accounts: &VaultAccounts, amount: u64) -> LedgerResult<TransactionId> {
        let program_id = self.program_id;
        let reserve_floor = self.config.reserve_floor;

        self.execute("withdraw", &accounts.controller, |changes| {
            load_vault(changes, accounts, &program_id)?;
            let balance = invariants::balance_after_withdraw(
                changes.lamports(&accounts.vault),
                amount,
                reserve_floor,
            )?;

            changes.transfer(&accounts.vault, &accounts.controller, amount)?;
            msg!("Withdrew {} lamports, vault balance {}", amount, balance);
            Ok(())
        })
    }

    pub fn close(&mut self, accounts: &VaultAccounts) -> LedgerResult<TransactionId> {
        let program_id = self.program_id;

        self.execute("close", &accounts.controller, |changes| {
            load_vault(changes, accounts, &program_id)?;
            let drained = changes.lamports(&accounts.vault);
            let rent = changes.lamports(&accounts.vault_state);
            let refunded = invariants::closing_refund(drained, rent)?;

            if drained > 0 {
                changes.transfer(&accounts.vault, &accounts.controller, drained)?;
            }
            if rent > 0 {
                changes.transfer(&accounts.vault_state, &accounts.controller, rent)?;
            }
            changes.delete(&accounts.vault);
            changes.delete(&accounts.vault_state);

            msg!("Vault closed, {} lamports returned to {}", refunded, accounts.controller);
            Ok(())
        })
    }

    fn execute<F>(&mut self, label: &str, signer: &Pubkey, op: F) -> LedgerResult<TransactionId>
    where
        F: FnOnce(&mut Changeset<'_, S>) -> LedgerResult<()>,
    {
        let mut changes = Changeset::new(&mut self.store);
        if let Err(err) = op(&mut changes) {
            msg!("{} rejected: {}", label, err);
            return Err(err);
        }
        changes.commit();

        self.sequence += 1;
        let digest = Sha256::new()
            .chain_update(label.as_bytes())
            .chain_update(signer.as_ref())
            .chain_update(self.sequence.to_le_bytes())
            .finalize();
        Ok(Hash::new_from_array(digest.into()))
    }
}

/// Load the VaultState named by `accounts` and authorize the caller.
fn load_vault<S: AccountStore>(
    changes: &Changeset<'_, S>,
    accounts: &VaultAccounts,
    program_id: &Pubkey,
) -> LedgerResult<VaultState> {
    let account = changes
        .get(&accounts.vault_state)
        .filter(|account| account.owner == *program_id && !account.data.is_empty())
        .ok_or(VaultError::NotInitialized)?;
    let state = VaultState::decode(&account.data)?;
    state.authorize(
        &accounts.vault_state,
        &accounts.vault,
        &accounts.controller,
        program_id,
    )?;
    Ok(state)
}
