// wallet-core/src/crypto/scheme.rs
//
// Signature schemes supported by Sui accounts.
//
// ┌────────────┬──────┬─────────┬──────────────────────┬────────────┐
// │ Scheme     │ Flag │ Purpose │ Path rule            │ Public key │
// ├────────────┼──────┼─────────┼──────────────────────┼────────────┤
// │ Ed25519    │ 0x00 │ 44      │ hardened only        │ 32 bytes   │
// │ Secp256k1  │ 0x01 │ 54      │ hardened + normal    │ 33 bytes   │
// │ Secp256r1  │ 0x02 │ 74      │ hardened + normal    │ 33 bytes   │
// └────────────┴──────┴─────────┴──────────────────────┴────────────┘

use crate::error::{CryptoError, EncodingError, WalletError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Curve / signature scheme tag.
///
/// The flag byte is what Sui prepends to public keys before hashing them into
/// an address, and what the `suiprivkey` bech32 payload starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// SLIP-0010, hardened-only derivation
    Ed25519,
    /// BIP-32
    Secp256k1,
    /// BIP-32 over the secp256k1 group, converted to P-256 at the end
    Secp256r1,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Ed25519, Scheme::Secp256k1, Scheme::Secp256r1];

    /// Address / key-encoding flag byte.
    #[inline]
    pub const fn flag(self) -> u8 {
        match self {
            Scheme::Ed25519 => 0x00,
            Scheme::Secp256k1 => 0x01,
            Scheme::Secp256r1 => 0x02,
        }
    }

    /// BIP-44 purpose level used by the default derivation path.
    #[inline]
    pub const fn purpose(self) -> u32 {
        match self {
            Scheme::Ed25519 => 44,
            Scheme::Secp256k1 => 54,
            Scheme::Secp256r1 => 74,
        }
    }

    /// Ed25519 (SLIP-0010) cannot derive non-hardened children.
    #[inline]
    pub const fn requires_hardened(self) -> bool {
        matches!(self, Scheme::Ed25519)
    }

    /// Length of the public key encoding (raw for Ed25519, SEC1 compressed otherwise).
    #[inline]
    pub const fn public_key_len(self) -> usize {
        match self {
            Scheme::Ed25519 => 32,
            Scheme::Secp256k1 | Scheme::Secp256r1 => 33,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Scheme::Ed25519 => "ed25519",
            Scheme::Secp256k1 => "secp256k1",
            Scheme::Secp256r1 => "secp256r1",
        }
    }

    /// Reverse of [`Scheme::flag`].
    pub fn from_flag(flag: u8) -> Result<Self, EncodingError> {
        match flag {
            0x00 => Ok(Scheme::Ed25519),
            0x01 => Ok(Scheme::Secp256k1),
            0x02 => Ok(Scheme::Secp256r1),
            other => Err(EncodingError::UnknownSchemeFlag(other)),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Scheme::Ed25519),
            "secp256k1" | "k256" => Ok(Scheme::Secp256k1),
            "secp256r1" | "p256" => Ok(Scheme::Secp256r1),
            _ => Err(WalletError::Crypto(CryptoError::UnsupportedScheme(
                s.to_string(),
            ))),
        }
    }
}
