//! Host-side model of the account ledger the program runs against.
//!
//! The runtime's account database is replaced by an injected
//! [`AccountStore`], and its all-or-nothing transaction semantics by a
//! [`Changeset`] that only reaches the store on commit. [`VaultLedger`] runs
//! the four vault operations on top of both, using the same derivation and
//! balance rules as the on-chain handlers.

pub mod changeset;
pub mod config;
pub mod processor;
pub mod store;

pub use changeset::*;
pub use config::*;
pub use processor::*;
pub use store::*;

pub type LedgerResult<T> = std::result::Result<T, crate::error::VaultError>;
