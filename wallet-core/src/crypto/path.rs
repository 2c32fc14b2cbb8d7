// wallet-core/src/crypto/path.rs
//
// Derivation path parsing: "m/44'/784'/0'/0'/0'" -> [Segment; 5]
//
// Accepted hardened markers: ' h H

use crate::crypto::scheme::Scheme;
use crate::error::{CryptoError, WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// High bit marking a hardened child index.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One level of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    index: u32,
    hardened: bool,
}

impl Segment {
    /// Builds a segment; `index` must fit in 31 bits.
    pub fn new(index: u32, hardened: bool) -> WalletResult<Self> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::Crypto(CryptoError::MalformedPath(format!(
                "index {} is not below 2^31",
                index
            ))));
        }
        Ok(Self { index, hardened })
    }

    pub fn hardened(index: u32) -> WalletResult<Self> {
        Self::new(index, true)
    }

    pub fn normal(index: u32) -> WalletResult<Self> {
        Self::new(index, false)
    }

    /// The 31-bit index without the hardened bit.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Index as serialized into the HMAC input (`index | 2^31` when hardened).
    #[inline]
    pub fn hardened_index(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// Parsed derivation path. Immutable once built; an empty path denotes the master key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DerivationPath {
    segments: Vec<Segment>,
}

impl DerivationPath {
    /// The master key path, `m`.
    pub fn master() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parse `m/i[']/.../i[']`.
    ///
    /// Fails with `MalformedPath` on a missing leading `m`, an empty or
    /// non-numeric component, or an index >= 2^31.
    pub fn parse(text: &str) -> WalletResult<Self> {
        let path = text.trim();
        let mut parts = path.split('/');

        match parts.next() {
            Some("m") => {}
            _ => return Err(malformed(format!("path must start with 'm': '{}'", path))),
        }

        let mut segments = Vec::new();
        for part in parts {
            segments.push(parse_segment(part, path)?);
        }

        Ok(Self { segments })
    }

    /// Rejects non-hardened segments when the scheme is Ed25519.
    pub fn validate_for_scheme(&self, scheme: Scheme) -> WalletResult<()> {
        if !scheme.requires_hardened() {
            return Ok(());
        }
        if let Some((depth, segment)) = self
            .segments
            .iter()
            .enumerate()
            .find(|(_, s)| !s.is_hardened())
        {
            return Err(WalletError::Crypto(CryptoError::InvalidDerivationSegment(
                format!(
                    "{} requires hardened segments, level {} is '{}'",
                    scheme, depth, segment
                ),
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.segments.is_empty()
    }

    /// New path with `segment` appended.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

fn malformed(msg: String) -> WalletError {
    WalletError::Crypto(CryptoError::MalformedPath(msg))
}

fn parse_segment(part: &str, path: &str) -> WalletResult<Segment> {
    let (digits, hardened) = match part.strip_suffix(&['\'', 'h', 'H'][..]) {
        Some(digits) => (digits, true),
        None => (part, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(format!(
            "invalid component '{}' in '{}'",
            part, path
        )));
    }

    let index: u32 = digits
        .parse()
        .map_err(|_| malformed(format!("index '{}' out of range in '{}'", digits, path)))?;

    Segment::new(index, hardened)
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DerivationPath {
    type Error = WalletError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DerivationPath> for String {
    fn from(path: DerivationPath) -> Self {
        path.to_string()
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
