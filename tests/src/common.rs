use std::path::PathBuf;

use anchor_lang::{AnchorDeserialize, Discriminator};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use custodial_vault::ledger::{InMemoryStore, VaultAccounts, VaultConfig, VaultLedger};
use litesvm::types::TransactionResult;
use litesvm::LiteSVM;
use sha2::{Digest, Sha256};
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_message::Message;
use solana_native_token::LAMPORTS_PER_SOL;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;

pub const ONE_SOL: u64 = LAMPORTS_PER_SOL;

// ---------------------------------------------------------------------------
// Host ledger
// ---------------------------------------------------------------------------

/// A ledger with default rent and one funded controller.
pub fn ledger_with_controller(lamports: u64) -> (VaultLedger<InMemoryStore>, VaultAccounts) {
    let mut ledger = VaultLedger::new(
        InMemoryStore::new(),
        custodial_vault::ID,
        VaultConfig::default(),
    );
    let accounts =
        VaultAccounts::derive(anchor_lang::prelude::Pubkey::new_unique(), &custodial_vault::ID)
            .unwrap();
    ledger.airdrop(&accounts.controller, lamports).unwrap();
    (ledger, accounts)
}

/// Initialize and deposit one SOL.
pub fn funded_vault() -> (VaultLedger<InMemoryStore>, VaultAccounts) {
    let (mut ledger, accounts) = ledger_with_controller(10 * ONE_SOL);
    ledger.initialize(&accounts).unwrap();
    ledger.deposit(&accounts, ONE_SOL).unwrap();
    (ledger, accounts)
}

// ---------------------------------------------------------------------------
// LiteSVM
// ---------------------------------------------------------------------------

pub fn program_id() -> Pubkey {
    Pubkey::new_from_array(custodial_vault::ID.to_bytes())
}

pub fn read_program(name: &str) -> Vec<u8> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("target");
    path.push("deploy");
    path.push(format!("{}.so", name));
    std::fs::read(&path).unwrap_or_else(|_| {
        panic!("Failed to read {}; run `anchor build` first", path.display())
    })
}

/// LiteSVM with the vault program loaded and a controller holding 10 SOL.
pub fn setup_svm() -> (LiteSVM, Keypair) {
    let mut svm = LiteSVM::new();
    svm.add_program(program_id(), &read_program("custodial_vault"))
        .expect("Failed to add program");

    let controller = Keypair::new();
    svm.airdrop(&controller.pubkey(), 10 * ONE_SOL).unwrap();
    (svm, controller)
}

pub fn vault_addresses(controller: &Pubkey) -> (Pubkey, Pubkey) {
    let (vault_state, _) =
        Pubkey::find_program_address(&[b"state", controller.as_ref()], &program_id());
    let (vault, _) = Pubkey::find_program_address(&[b"vault", vault_state.as_ref()], &program_id());
    (vault_state, vault)
}

/// Anchor instruction discriminator.
pub fn sighash(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("global:{}", name).as_bytes());
    let result = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&result[..8]);
    disc
}

pub fn vault_instruction(
    signer: &Pubkey,
    vault_state: &Pubkey,
    vault: &Pubkey,
    name: &str,
    args: &[u8],
) -> Instruction {
    let mut data = sighash(name).to_vec();
    data.extend_from_slice(args);

    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new(*vault_state, false),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(solana_sdk_ids::system_program::ID, false),
        ],
        data,
    }
}

pub fn send(svm: &mut LiteSVM, signer: &Keypair, ix: Instruction) -> TransactionResult {
    // Identical instructions would otherwise hash to an already-processed tx.
    svm.expire_blockhash();
    let msg = Message::new(&[ix], Some(&signer.pubkey()));
    let tx = Transaction::new(&[signer], msg, svm.latest_blockhash());
    svm.send_transaction(tx)
}

/// First `emit!` record in `logs`, checked against its discriminator.
pub fn decode_event<E: Discriminator + AnchorDeserialize>(logs: &[String]) -> E {
    let payload = logs
        .iter()
        .find_map(|log| log.strip_prefix("Program data: "))
        .expect("no event in logs");
    let bytes = STANDARD.decode(payload).expect("event is not base64");
    assert_eq!(&bytes[..8], E::DISCRIMINATOR, "unexpected event discriminator");
    E::deserialize(&mut &bytes[8..]).expect("event does not decode")
}

/// Assert the transaction failed with the named Anchor error.
pub fn assert_error_code(result: TransactionResult, name: &str) {
    let failed = match result {
        Ok(meta) => panic!("expected {}, transaction succeeded: {:#?}", name, meta.logs),
        Err(failed) => failed,
    };
    let needle = format!("Error Code: {}.", name);
    assert!(
        failed.meta.logs.iter().any(|log| log.contains(&needle)),
        "expected {}, logs: {:#?}",
        name,
        failed.meta.logs
    );
}
