use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DocweaveError;

// Truncated blake3 prefix. Used for dedup and debug display only.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortDigest<const N: usize>([u8; N]);

pub type EntryId = ShortDigest<8>;
pub type PathwaySignature = ShortDigest<6>;

impl<const N: usize> ShortDigest<N> {
    #[must_use]
    pub fn of(content: &str) -> Self {
        let hash = blake3::hash(content.as_bytes());
        let mut out = [0_u8; N];
        out.copy_from_slice(&hash.as_bytes()[..N]);
        Self(out)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl EntryId {
    #[must_use]
    pub fn for_entry(path: &str, content_type: &str, weight: f64) -> Self {
        Self::of(&format!("{path}:{content_type}:{weight}"))
    }
}

impl PathwaySignature {
    #[must_use]
    pub fn for_pathway(source: &str, target: &str, weight: f64) -> Self {
        Self::of(&format!("{source}:{target}:{weight}"))
    }
}

impl<const N: usize> fmt::Display for ShortDigest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for ShortDigest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortDigest({self})")
    }
}

impl<const N: usize> FromStr for ShortDigest<N> {
    type Err = DocweaveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != N * 2 || !raw.is_ascii() {
            return Err(DocweaveError::Validation(format!(
                "digest must be {} hex chars, got '{raw}'",
                N * 2
            )));
        }
        let mut out = [0_u8; N];
        for (idx, slot) in out.iter_mut().enumerate() {
            let pair = &raw[idx * 2..idx * 2 + 2];
            *slot = u8::from_str_radix(pair, 16)
                .map_err(|_| DocweaveError::Validation(format!("invalid hex digest: {raw}")))?;
        }
        Ok(Self(out))
    }
}

impl<const N: usize> Serialize for ShortDigest<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const N: usize> Deserialize<'de> for ShortDigest<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
