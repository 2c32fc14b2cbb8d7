// wallet-core/src/chains/sui/mod.rs

//! Sui Chain Support
//!
//! # Key Features
//! - **Address Derivation**: Blake2b-256 account addresses via [`SuiAddress`].
//! - **Intent Framing**: `intent || BCS(value)` messages and their digests via [`IntentMessage`].
//! - **Signing**: Ed25519 / ECDSA signatures over intent digests via [`SuiSigner`].

pub mod address;
pub mod intent;
pub mod signer;

// Re-exports for cleaner API access
pub use address::SuiAddress;
pub use intent::{
    hash_intent_message, AppId, Intent, IntentMessage, IntentScope, IntentVersion,
    PersonalMessage,
};
pub use signer::{SignatureOutput, SuiSigner};
