use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Encoding Error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Intent Error: {0}")]
    Intent(#[from] IntentError),
}

/// Key material, derivation and signing failures.
///
/// None of the variants carry secret bytes; messages only describe lengths,
/// path text or the library error kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Secret key must be {expected} bytes, got {actual}")]
    InvalidSecretLength { expected: usize, actual: usize },

    #[error("Scalar is zero or not below the curve order")]
    InvalidScalar,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Derived child scalar is invalid (IL >= n or child == 0)")]
    InvalidChildScalar,

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid derivation segment: {0}")]
    InvalidDerivationSegment(String),

    #[error("Malformed derivation path: {0}")]
    MalformedPath(String),

    #[error("Randomness source unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid bech32 encoding: {0}")]
    InvalidEncoding(String),

    #[error("Unexpected human-readable prefix '{0}'")]
    UnexpectedPrefix(String),

    #[error("Invalid payload length: {0}")]
    InvalidPayloadLength(usize),

    #[error("Unknown scheme flag 0x{0:02x}")]
    UnknownSchemeFlag(u8),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("Serialized intent must be 3 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid intent scope byte {0}")]
    InvalidScope(u8),

    #[error("Invalid intent version byte {0}")]
    InvalidVersion(u8),

    #[error("Invalid intent app id byte {0}")]
    InvalidAppId(u8),

    #[error("Invalid intent hex: {0}")]
    InvalidHex(String),

    #[error("Payload serialization failed: {0}")]
    PayloadSerialization(String),
}
