// wallet-core/src/lib.rs

//! Sui wallet core: HD key derivation for Ed25519, secp256k1 and secp256r1,
//! `suiprivkey` encoding, account addresses and intent signing.
//!
//! Seeds come from the caller (e.g. a BIP-39 module); nothing here touches
//! the network or the filesystem.

pub mod chains;
pub mod crypto;
pub mod error;

pub use chains::sui::{Intent, IntentMessage, SuiAddress, SuiSigner};
pub use crypto::{DerivationPath, Keypair, KeyDeriver, Scheme};
pub use error::{CryptoError, EncodingError, IntentError, WalletError, WalletResult};
