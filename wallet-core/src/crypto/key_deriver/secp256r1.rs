// wallet-core/src/crypto/key_deriver/secp256r1.rs
//
// secp256r1 Key Derivation - BIP-32 over the secp256k1 group
//
// Wallets in the Sui ecosystem derive P-256 keys by running plain BIP-32
// ("Bitcoin seed" master, secp256k1 order, secp256k1 public points for normal
// steps) and only then reading the final 32 bytes as a P-256 scalar.
// Changing any of this breaks compatibility with existing wallets.
//
//   seed ──BIP-32 (k256)──▶ k ──range check vs n(P-256)──▶ P-256 key

use super::bip32::{child_key_derive, NistP256Group, Secp256k1Group};
use super::secp256k1::Secp256k1Deriver;
use super::{derive_with, master_key, DerivedKey, ExtendedKey, HdDeriver};
use crate::crypto::path::{DerivationPath, Segment};
use crate::crypto::scheme::Scheme;
use crate::error::WalletResult;

/// secp256r1 Key Deriver
///
/// Two-stage validation: every step is checked against the secp256k1 order,
/// the final scalar against the P-256 order (`InvalidPrivateKey`).
pub struct Secp256r1Deriver;

impl Secp256r1Deriver {
    pub fn derive(seed: &[u8], path: &DerivationPath) -> WalletResult<DerivedKey> {
        derive_with::<Self>(seed, path)
    }
}

impl HdDeriver for Secp256r1Deriver {
    const SCHEME: Scheme = Scheme::Secp256r1;

    fn master_key(seed: &[u8]) -> WalletResult<ExtendedKey> {
        master_key(Secp256k1Deriver::MASTER_SECRET, seed)
    }

    fn child_key_derive(parent: &ExtendedKey, segment: &Segment) -> WalletResult<ExtendedKey> {
        child_key_derive::<Secp256k1Group>(parent, segment)
    }

    fn finalize(key: &ExtendedKey) -> WalletResult<()> {
        NistP256Group::public_key(&key.secret).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_deriver::Bip32Curve;
    use crate::crypto::paths::DerivationPaths;
    use crate::error::{CryptoError, WalletError};
    use zeroize::Zeroizing;

    const TEST_SEED: &str = concat!(
        "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80",
        "459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6"
    );

    #[test]
    fn test_scalar_matches_secp256k1_derivation() {
        // same steps, same scalar; only the final curve differs
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let path = DerivationPath::parse("m/0'/1").unwrap();

        let r1 = Secp256r1Deriver::derive(&seed, &path).unwrap();
        let k1 = Secp256k1Deriver::derive(&seed, &path).unwrap();

        assert_eq!(&*r1.private_key, &*k1.private_key);
        assert_eq!(&*r1.chain_code, &*k1.chain_code);
        assert_eq!(
            hex::encode(&*r1.private_key),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
        assert_eq!(r1.scheme, Scheme::Secp256r1);
    }

    #[test]
    fn test_public_key_on_p256() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let path = DerivationPath::parse(DerivationPaths::SECP256R1_0).unwrap();
        let key = Secp256r1Deriver::derive(&seed, &path).unwrap();

        let p256_pub = NistP256Group::public_key(&key.private_key).unwrap();
        let k256_pub = Secp256k1Group::public_key(&key.private_key).unwrap();
        assert_ne!(p256_pub, k256_pub);
    }

    #[test]
    fn test_final_check_uses_p256_order() {
        // above both group orders
        let key = ExtendedKey {
            secret: Zeroizing::new([0xff; 32]),
            chain_code: Zeroizing::new([0u8; 32]),
        };
        assert!(matches!(
            Secp256r1Deriver::finalize(&key),
            Err(WalletError::Crypto(CryptoError::InvalidPrivateKey(_)))
        ));

        // n(P-256) < x < n(secp256k1)
        let mut between = [0xff; 32];
        between[4] = 0x00;
        let key = ExtendedKey {
            secret: Zeroizing::new(between),
            chain_code: Zeroizing::new([0u8; 32]),
        };
        assert!(Secp256k1Deriver::finalize(&key).is_ok());
        assert!(Secp256r1Deriver::finalize(&key).is_err());
    }
}
