// wallet-core/src/crypto/paths.rs
//
// Default Sui derivation paths, one convention per scheme.
// Purpose follows the scheme (44 / 54 / 74), coin type is SLIP-44 784.

use crate::crypto::path::{DerivationPath, Segment};
use crate::crypto::scheme::Scheme;
use crate::error::WalletResult;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 registered coin types.
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const SUI: u32 = 784;
}

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Pre-built derivation paths for Sui accounts.
///
/// # Conventions
/// - Ed25519:   `m/44'/784'/account'/change'/index'` (SLIP-0010, all hardened)
/// - Secp256k1: `m/54'/784'/account'/change/index`   (BIP-32)
/// - Secp256r1: `m/74'/784'/account'/change/index`   (BIP-32 over secp256k1)
///
/// See `Secp256r1Deriver` for how the secp256r1 key is checked against P-256.
pub struct DerivationPaths;

impl DerivationPaths {
    pub const ED25519_0: &'static str = "m/44'/784'/0'/0'/0'";
    pub const SECP256K1_0: &'static str = "m/54'/784'/0'/0/0";
    pub const SECP256R1_0: &'static str = "m/74'/784'/0'/0/0";

    /// First account path for `scheme`.
    pub const fn default_for(scheme: Scheme) -> &'static str {
        match scheme {
            Scheme::Ed25519 => Self::ED25519_0,
            Scheme::Secp256k1 => Self::SECP256K1_0,
            Scheme::Secp256r1 => Self::SECP256R1_0,
        }
    }

    /// Path string for `(account, index)` under the scheme's convention.
    pub fn for_scheme(scheme: Scheme, account: u32, index: u32) -> String {
        let purpose = scheme.purpose();
        if scheme.requires_hardened() {
            format!(
                "m/{}'/{}'/{}'/0'/{}'",
                purpose,
                coin_type::SUI,
                account,
                index
            )
        } else {
            format!(
                "m/{}'/{}'/{}'/0/{}",
                purpose,
                coin_type::SUI,
                account,
                index
            )
        }
    }

    /// Typed variant of [`DerivationPaths::for_scheme`].
    pub fn build(scheme: Scheme, account: u32, index: u32) -> WalletResult<DerivationPath> {
        let hardened_tail = scheme.requires_hardened();
        Ok(DerivationPath::from_segments(vec![
            Segment::hardened(scheme.purpose())?,
            Segment::hardened(coin_type::SUI)?,
            Segment::hardened(account)?,
            Segment::new(0, hardened_tail)?,
            Segment::new(index, hardened_tail)?,
        ]))
    }

    /// Parent path (without the address index) for batch derivation.
    pub fn account_base(scheme: Scheme, account: u32) -> String {
        let marker = if scheme.requires_hardened() { "'" } else { "" };
        format!(
            "m/{}'/{}'/{}'/0{}",
            scheme.purpose(),
            coin_type::SUI,
            account,
            marker
        )
    }
}
