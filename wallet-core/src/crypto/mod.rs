// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Schemes**: Ed25519, secp256k1 and secp256r1 with their Sui flags via [`Scheme`].
//! - **Derivation Paths**: Parsing, validation and Sui presets via [`DerivationPath`] and
//!   [`DerivationPaths`].
//! - **Key Derivation**: SLIP-0010 and BIP-32 over one unified interface via [`KeyDeriver`].
//! - **Keypairs**: Generation, import and derivation via [`Keypair`].
//! - **Private Key Encoding**: `suiprivkey` bech32 strings via [`encode_private_key`] /
//!   [`decode_private_key`].

pub mod key_deriver;
pub mod keypair;
pub mod path;
pub mod paths;
pub mod private_key;
pub mod scheme;

// Re-exports for cleaner API access
pub use key_deriver::{DerivedKey, KeyDeriver};
pub use keypair::Keypair;
pub use path::{DerivationPath, Segment};
pub use paths::DerivationPaths;
pub use private_key::{decode_private_key, encode_private_key, ParsedPrivateKey};
pub use scheme::Scheme;
