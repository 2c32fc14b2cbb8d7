// wallet-core/src/chains/sui/address.rs
//
// Sui Address Module
//
//   address = "0x" || hex( Blake2b-256( flag(1) || public_key ) )
//
// The full 32-byte digest is used; there is no truncation and no checksum
// casing, so the canonical form is 64 lowercase hex digits.

use crate::crypto::scheme::Scheme;
use crate::error::{EncodingError, WalletError, WalletResult};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Length of a Sui account address in bytes.
pub const SUI_ADDRESS_LENGTH: usize = 32;

/// Sui Address Generator
///
/// # Flow: Public Key → flag || pk → Blake2b-256 → Address (32B)
///
/// Works from public keys only; private material never reaches this module.
pub struct SuiAddress;

impl SuiAddress {
    /// Derive the 32 address bytes for `public_key` under `scheme`.
    ///
    /// The public key length is checked against the scheme (32 bytes raw for
    /// Ed25519, 33 bytes SEC1-compressed for the ECDSA schemes).
    pub fn derive_bytes(
        scheme: Scheme,
        public_key: &[u8],
    ) -> WalletResult<[u8; SUI_ADDRESS_LENGTH]> {
        if public_key.len() != scheme.public_key_len() {
            return Err(WalletError::Encoding(EncodingError::InvalidAddress(format!(
                "{} public key must be {} bytes, got {}",
                scheme,
                scheme.public_key_len(),
                public_key.len()
            ))));
        }

        let mut hasher = Blake2b256::new();
        hasher.update([scheme.flag()]);
        hasher.update(public_key);

        let mut address = [0u8; SUI_ADDRESS_LENGTH];
        address.copy_from_slice(&hasher.finalize());
        Ok(address)
    }

    /// Derive the `0x`-prefixed lowercase hex address.
    #[inline]
    pub fn derive(scheme: Scheme, public_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::derive_bytes(scheme, public_key)?;
        Ok(format!("0x{}", hex::encode(bytes)))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// `0x` followed by exactly 64 hex digits (either case).
    pub fn is_valid(address: &str) -> bool {
        match address.strip_prefix("0x") {
            Some(digits) => {
                digits.len() == SUI_ADDRESS_LENGTH * 2
                    && digits.bytes().all(|b| b.is_ascii_hexdigit())
            }
            None => false,
        }
    }

    /// Canonical form: lowercase, `0x`-prefixed, left-padded to 64 digits.
    ///
    /// Accepts short forms such as `"0x2"` and a missing prefix.
    pub fn normalize(address: &str) -> WalletResult<String> {
        let trimmed = address.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        if digits.is_empty()
            || digits.len() > SUI_ADDRESS_LENGTH * 2
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(WalletError::Encoding(EncodingError::InvalidAddress(
                address.to_string(),
            )));
        }

        Ok(format!(
            "0x{:0>width$}",
            digits.to_ascii_lowercase(),
            width = SUI_ADDRESS_LENGTH * 2
        ))
    }

    /// Compare two addresses after normalization. Invalid input never matches.
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (Self::normalize(addr1), Self::normalize(addr2)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
