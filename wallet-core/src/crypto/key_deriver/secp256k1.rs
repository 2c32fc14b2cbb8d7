// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use super::bip32::{child_key_derive, Bip32Curve, Secp256k1Group};
use super::{derive_with, master_key, DerivedKey, ExtendedKey, HdDeriver};
use crate::crypto::path::{DerivationPath, Segment};
use crate::crypto::scheme::Scheme;
use crate::error::WalletResult;

/// secp256k1 Key Deriver - BIP-32 Standard
///
/// # Security
/// - Private keys wrapped in `Zeroizing<[u8; 32]>` (auto-zeroize on drop)
/// - Intermediate (key, chain code) pairs are zeroed as soon as the next level exists
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// BIP-32 master key salt
    pub(crate) const MASTER_SECRET: &'static [u8] = b"Bitcoin seed";

    /// Derive a secp256k1 private scalar from `seed` along `path`.
    pub fn derive(seed: &[u8], path: &DerivationPath) -> WalletResult<DerivedKey> {
        derive_with::<Self>(seed, path)
    }

    /// Validate path format
    #[inline]
    pub fn is_valid_path(path: &str) -> bool {
        DerivationPath::parse(path).is_ok()
    }
}

impl HdDeriver for Secp256k1Deriver {
    const SCHEME: Scheme = Scheme::Secp256k1;

    fn master_key(seed: &[u8]) -> WalletResult<ExtendedKey> {
        master_key(Self::MASTER_SECRET, seed)
    }

    fn child_key_derive(parent: &ExtendedKey, segment: &Segment) -> WalletResult<ExtendedKey> {
        child_key_derive::<Secp256k1Group>(parent, segment)
    }

    fn finalize(key: &ExtendedKey) -> WalletResult<()> {
        Secp256k1Group::public_key(&key.secret).map(|_| ())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    const TEST_SEED: &str = concat!(
        "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80",
        "459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6"
    );

    fn derive(seed: &[u8], path: &str) -> WalletResult<DerivedKey> {
        Secp256k1Deriver::derive(seed, &DerivationPath::parse(path)?)
    }

    #[test]
    fn test_derive_sui_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = derive(&seed, DerivationPaths::SECP256K1_0).unwrap();
        assert_eq!(key.private_key.len(), 32);
        assert_eq!(key.scheme, Scheme::Secp256k1);
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let k1 = derive(&seed, DerivationPaths::SECP256K1_0).unwrap();
        let k2 = derive(&seed, DerivationPaths::SECP256K1_0).unwrap();
        assert_eq!(&*k1.private_key, &*k2.private_key);
    }

    #[test]
    fn test_different_paths_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let a = derive(&seed, "m/54'/784'/0'/0/0").unwrap();
        let b = derive(&seed, "m/54'/784'/0'/0/1").unwrap();
        let c = derive(&seed, "m/54'/784'/0'/0'/0").unwrap();
        assert_ne!(&*a.private_key, &*b.private_key);
        assert_ne!(&*a.private_key, &*c.private_key);
    }

    #[test]
    fn test_is_valid_path() {
        assert!(Secp256k1Deriver::is_valid_path("m/54'/784'/0'/0/0"));
        assert!(!Secp256k1Deriver::is_valid_path("invalid"));
    }

    // =========================================================================
    // BIP-32 Test Vector 1
    // =========================================================================
    // Seed: 000102030405060708090a0b0c0d0e0f

    const BIP32_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn test_bip32_vector_master() {
        let seed = hex::decode(BIP32_SEED).unwrap();
        let key = derive(&seed, "m").unwrap();
        assert_eq!(
            hex::encode(&*key.private_key),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(&*key.chain_code),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }

    #[test]
    fn test_bip32_vector_m_0h() {
        let seed = hex::decode(BIP32_SEED).unwrap();
        let key = derive(&seed, "m/0'").unwrap();
        assert_eq!(
            hex::encode(&*key.private_key),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            hex::encode(&*key.chain_code),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
        assert_eq!(
            hex::encode(Secp256k1Group::public_key(&key.private_key).unwrap()),
            "035a784662a4a20a65bf6aab9ae98a6c068a81c52e4b032c0fb5400c706cfccc56"
        );
    }

    #[test]
    fn test_bip32_vector_m_0h_1() {
        // exercises the non-hardened (public point) branch
        let seed = hex::decode(BIP32_SEED).unwrap();
        let key = derive(&seed, "m/0'/1").unwrap();
        assert_eq!(
            hex::encode(&*key.private_key),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
        assert_eq!(
            hex::encode(&*key.chain_code),
            "2a7857631386ba23dacac34180dd1983734e444fdbf774041578e9b6adb37c19"
        );
    }
}
