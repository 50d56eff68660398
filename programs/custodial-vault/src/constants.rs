/// Seed tag for the VaultState PDA: `[STATE_SEED, controller]`.
pub const STATE_SEED: &[u8] = b"state";

/// Seed tag for the vault PDA: `[VAULT_SEED, vault_state]`.
pub const VAULT_SEED: &[u8] = b"vault";

/// Width of the Anchor account discriminator prefixed to VaultState.
pub const DISCRIMINATOR_LEN: usize = 8;
