//! Fuzz test for vault balance invariants
//!
//! Drives random deposit/withdraw sequences (and the occasional stranger
//! signing for the vault) through the host ledger and checks after every
//! step that:
//!
//! - deposits minus withdrawals equal the balance above the reserve floor,
//! - the vault never sits below the floor while it exists,
//! - a rejected operation leaves every balance exactly as it was.

use anchor_lang::prelude::Pubkey;
use custodial_vault::error::VaultError;
use custodial_vault::ledger::{InMemoryStore, VaultAccounts, VaultConfig, VaultLedger};

const ONE_SOL: u64 = 1_000_000_000;

/// One fuzzed operation
#[derive(Debug, Clone, Copy)]
pub enum VaultOp {
    Deposit(u64),
    Withdraw(u64),
    StrangerWithdraw(u64),
}

impl VaultOp {
    /// Map a random word to an operation. Amounts are biased toward the
    /// interesting range around the vault balance and the floor.
    pub fn from_seed(seed: u64) -> Self {
        let amount = match (seed >> 8) % 4 {
            0 => 0,
            1 => (seed >> 16) % 2_000_000,
            2 => (seed >> 16) % (3 * ONE_SOL),
            _ => seed >> 16,
        };
        match seed % 8 {
            0..=3 => VaultOp::Deposit(amount),
            4..=6 => VaultOp::Withdraw(amount),
            _ => VaultOp::StrangerWithdraw(amount),
        }
    }
}

pub struct VaultHarness {
    ledger: VaultLedger<InMemoryStore>,
    owner: VaultAccounts,
    stranger: Pubkey,
    net_deposits: i128,
}

impl VaultHarness {
    pub fn new(controller_lamports: u64) -> Result<Self, VaultError> {
        let mut ledger = VaultLedger::new(
            InMemoryStore::new(),
            custodial_vault::ID,
            VaultConfig::default(),
        );
        let owner = VaultAccounts::derive(Pubkey::new_unique(), &custodial_vault::ID)?;
        let stranger = Pubkey::new_unique();
        ledger.airdrop(&owner.controller, controller_lamports)?;
        ledger.airdrop(&stranger, ONE_SOL)?;
        ledger.initialize(&owner)?;

        Ok(Self {
            ledger,
            owner,
            stranger,
            net_deposits: 0,
        })
    }

    fn balances(&self) -> [u64; 4] {
        [
            self.ledger.lamports(&self.owner.controller),
            self.ledger.lamports(&self.owner.vault_state),
            self.ledger.lamports(&self.owner.vault),
            self.ledger.lamports(&self.stranger),
        ]
    }

    /// Apply `op`, returning `false` if any invariant broke.
    pub fn step(&mut self, op: VaultOp) -> bool {
        let before = self.balances();

        let result = match op {
            VaultOp::Deposit(amount) => self
                .ledger
                .deposit(&self.owner, amount)
                .map(|_| amount as i128),
            VaultOp::Withdraw(amount) => self
                .ledger
                .withdraw(&self.owner, amount)
                .map(|_| -(amount as i128)),
            VaultOp::StrangerWithdraw(amount) => {
                let hijack = VaultAccounts {
                    controller: self.stranger,
                    ..self.owner
                };
                match self.ledger.withdraw(&hijack, amount) {
                    Err(VaultError::Unauthorized) => Err(VaultError::Unauthorized),
                    // Anything else means a stranger got past authorization.
                    _ => return false,
                }
            }
        };

        match result {
            Ok(delta) => self.net_deposits += delta,
            Err(_) => {
                if self.balances() != before {
                    return false;
                }
            }
        }

        self.check_conservation() && self.check_floor()
    }

    fn check_conservation(&self) -> bool {
        let floor = self.ledger.config().reserve_floor as i128;
        let balance = self.ledger.lamports(&self.owner.vault) as i128;
        self.net_deposits == balance - floor
    }

    fn check_floor(&self) -> bool {
        self.ledger.lamports(&self.owner.vault) >= self.ledger.config().reserve_floor
    }

    /// Close and confirm both records are gone and a second close moves nothing.
    pub fn finish(mut self) -> bool {
        if self.ledger.close(&self.owner).is_err() {
            return false;
        }
        let after = self.ledger.lamports(&self.owner.controller);
        self.ledger.account(&self.owner.vault).is_none()
            && self.ledger.account(&self.owner.vault_state).is_none()
            && self.ledger.close(&self.owner) == Err(VaultError::NotInitialized)
            && self.ledger.lamports(&self.owner.controller) == after
    }
}

/// Simple pseudo-random number generator for testing
fn rand_u64(seed: u64) -> u64 {
    let mut x = seed.wrapping_add(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Run one sequence of `len` operations; `Err` names the failing step.
pub fn run_sequence(seed: u64, len: u64) -> Result<(), String> {
    let mut harness = VaultHarness::new(1_000 * ONE_SOL).map_err(|e| e.to_string())?;
    for i in 0..len {
        let op = VaultOp::from_seed(rand_u64(seed.wrapping_mul(1_000).wrapping_add(i)));
        if !harness.step(op) {
            return Err(format!("seed {} step {}: {:?}", seed, i, op));
        }
    }
    if !harness.finish() {
        return Err(format!("seed {}: close", seed));
    }
    Ok(())
}


fn main() {
    println!("Vault Invariant Fuzz Test");
    println!("=========================");

    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(1_000);

    let mut failures = 0;
    for seed in 0..iterations {
        if let Err(failure) = run_sequence(seed, 100) {
            println!("FAILED {}", failure);
            failures += 1;
        }
    }
    println!("{} sequences, {} failures", iterations, failures);
    if failures > 0 {
        std::process::exit(1);
    }
}
