// wallet-core/src/crypto/keypair.rs
//
// Sui keypair over the three supported curves.
//
//   generate()          OsRng ─▶ 32 bytes ─▶ key
//   from_secret_key()   32 bytes ─▶ key             (no chain code, no path)
//   derive()            seed + path ─▶ KeyDeriver ─▶ key + chain code + path
//
// Key material lives in the curve crates' own secret types, which zero
// themselves on drop. Every accessor returning secret bytes hands out a
// fresh `Zeroizing` copy.

use crate::chains::sui::address::SuiAddress;
use crate::crypto::key_deriver::{DerivedKey, KeyDeriver};
use crate::crypto::path::DerivationPath;
use crate::crypto::private_key::{decode_private_key, encode_private_key, PRIVATE_KEY_SIZE};
use crate::crypto::scheme::Scheme;
use crate::error::{CryptoError, WalletError, WalletResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Curve-specific secret, one variant per [`Scheme`].
#[derive(Clone)]
pub(crate) enum KeyMaterial {
    Ed25519(ed25519_dalek::SigningKey),
    Secp256k1(k256::SecretKey),
    Secp256r1(p256::SecretKey),
}

/// A Sui account keypair.
///
/// Immutable once built. `chain_code` and `path` are only present for keys
/// produced by [`Keypair::derive`].
#[derive(Clone)]
pub struct Keypair {
    material: KeyMaterial,
    chain_code: Option<Zeroizing<[u8; 32]>>,
    path: Option<DerivationPath>,
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("scheme", &self.scheme())
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .field("path", &self.path.as_ref().map(|p| p.to_string()))
            .finish_non_exhaustive()
    }
}

fn invalid_length(actual: usize) -> WalletError {
    WalletError::Crypto(CryptoError::InvalidSecretLength {
        expected: PRIVATE_KEY_SIZE,
        actual,
    })
}

fn random_secret() -> WalletResult<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    OsRng
        .try_fill_bytes(&mut secret[..])
        .map_err(|e| WalletError::Crypto(CryptoError::RandomnessUnavailable(e.to_string())))?;
    Ok(secret)
}

impl KeyMaterial {
    /// Build curve key material from a 32-byte secret.
    ///
    /// Ed25519 accepts any seed; the ECDSA curves reject zero and values not
    /// below their group order with `InvalidScalar`.
    fn from_secret(scheme: Scheme, secret: &[u8; PRIVATE_KEY_SIZE]) -> WalletResult<Self> {
        match scheme {
            Scheme::Ed25519 => Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(secret))),
            Scheme::Secp256k1 => k256::SecretKey::from_bytes(k256::FieldBytes::from_slice(secret))
                .map(Self::Secp256k1)
                .map_err(|_| WalletError::Crypto(CryptoError::InvalidScalar)),
            Scheme::Secp256r1 => p256::SecretKey::from_bytes(p256::FieldBytes::from_slice(secret))
                .map(Self::Secp256r1)
                .map_err(|_| WalletError::Crypto(CryptoError::InvalidScalar)),
        }
    }

    fn scheme(&self) -> Scheme {
        match self {
            Self::Ed25519(_) => Scheme::Ed25519,
            Self::Secp256k1(_) => Scheme::Secp256k1,
            Self::Secp256r1(_) => Scheme::Secp256r1,
        }
    }
}

impl Keypair {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Fresh keypair from the operating system RNG.
    ///
    /// Out-of-range ECDSA draws are redrawn; only an RNG failure surfaces
    /// (`RandomnessUnavailable`).
    pub fn generate(scheme: Scheme) -> WalletResult<Self> {
        let material = loop {
            let secret = random_secret()?;
            match KeyMaterial::from_secret(scheme, &secret) {
                Ok(material) => break material,
                Err(WalletError::Crypto(CryptoError::InvalidScalar)) => continue,
                Err(e) => return Err(e),
            }
        };

        debug!(scheme = %scheme, "generated keypair");
        Ok(Self {
            material,
            chain_code: None,
            path: None,
        })
    }

    /// Rebuild a keypair from its 32-byte secret (Ed25519 seed or ECDSA scalar).
    pub fn from_secret_key(scheme: Scheme, secret_key: &[u8]) -> WalletResult<Self> {
        let secret: &[u8; PRIVATE_KEY_SIZE] = secret_key
            .try_into()
            .map_err(|_| invalid_length(secret_key.len()))?;

        Ok(Self {
            material: KeyMaterial::from_secret(scheme, secret)?,
            chain_code: None,
            path: None,
        })
    }

    /// HD-derive a keypair from `seed` along `path`.
    pub fn derive(scheme: Scheme, seed: &[u8], path: &DerivationPath) -> WalletResult<Self> {
        let derived = KeyDeriver::derive_path(seed, path, scheme)?;
        Self::from_derived(derived)
    }

    /// Wrap the output of [`KeyDeriver`], keeping its chain code and path.
    pub fn from_derived(derived: DerivedKey) -> WalletResult<Self> {
        let DerivedKey {
            private_key,
            chain_code,
            scheme,
            path,
        } = derived;

        let material = KeyMaterial::from_secret(scheme, &private_key).map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidPrivateKey(format!(
                "derived {} scalar is out of range",
                scheme
            )))
        })?;

        Ok(Self {
            material,
            chain_code: Some(chain_code),
            path: Some(path),
        })
    }

    /// Import a `suiprivkey1...` string.
    pub fn from_bech32(encoded: &str) -> WalletResult<Self> {
        let parsed = decode_private_key(encoded)?;
        Self::from_secret_key(parsed.scheme, &parsed.secret_key[..])
        // `parsed` dropped & zeroed here
    }

    /// Export as `suiprivkey1...`.
    pub fn to_bech32(&self) -> WalletResult<String> {
        encode_private_key(self.scheme(), &self.secret_key_bytes()[..])
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn scheme(&self) -> Scheme {
        self.material.scheme()
    }

    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Private key in the scheme's native export form.
    ///
    /// Ed25519 returns the 64-byte `seed || public key` pair; the ECDSA
    /// schemes return the 32-byte scalar.
    pub fn private_key_bytes(&self) -> Zeroizing<Vec<u8>> {
        match &self.material {
            KeyMaterial::Ed25519(key) => {
                let pair = Zeroizing::new(key.to_keypair_bytes());
                Zeroizing::new(pair.to_vec())
            }
            _ => Zeroizing::new(self.secret_key_bytes().to_vec()),
        }
    }

    /// The 32-byte secret that round-trips through [`Keypair::from_secret_key`].
    pub fn secret_key_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        match &self.material {
            KeyMaterial::Ed25519(key) => {
                let seed = Zeroizing::new(key.to_bytes());
                out.copy_from_slice(&seed[..]);
            }
            KeyMaterial::Secp256k1(key) => {
                let mut scalar = key.to_bytes();
                out.copy_from_slice(&scalar);
                scalar.as_mut_slice().zeroize();
            }
            KeyMaterial::Secp256r1(key) => {
                let mut scalar = key.to_bytes();
                out.copy_from_slice(&scalar);
                scalar.as_mut_slice().zeroize();
            }
        }
        out
    }

    /// Raw 32 bytes for Ed25519, 33-byte SEC1 compressed point otherwise.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        match &self.material {
            KeyMaterial::Ed25519(key) => key.verifying_key().to_bytes().to_vec(),
            KeyMaterial::Secp256k1(key) => {
                use k256::elliptic_curve::sec1::ToEncodedPoint;
                key.public_key().to_encoded_point(true).as_bytes().to_vec()
            }
            KeyMaterial::Secp256r1(key) => {
                use p256::elliptic_curve::sec1::ToEncodedPoint;
                key.public_key().to_encoded_point(true).as_bytes().to_vec()
            }
        }
    }

    /// base64(flag || public key)
    pub fn public_key_base64(&self) -> String {
        let public_key = self.public_key_bytes();
        let mut payload = Vec::with_capacity(1 + public_key.len());
        payload.push(self.scheme().flag());
        payload.extend_from_slice(&public_key);
        STANDARD.encode(payload)
    }

    /// `0x`-prefixed Sui address of this keypair.
    pub fn sui_address(&self) -> WalletResult<String> {
        SuiAddress::derive(self.scheme(), &self.public_key_bytes())
    }

    /// Final chain code of a derived key.
    pub fn chain_code(&self) -> Option<&[u8; 32]> {
        self.chain_code.as_deref()
    }

    pub fn path(&self) -> Option<&DerivationPath> {
        self.path.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
