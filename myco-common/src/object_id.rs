//! Document identifiers
//!
//! 12-byte identifiers rendered as 24 lowercase hex characters:
//! 4 bytes of big-endian Unix seconds, 5 bytes of per-process randomness,
//! and a 3-byte big-endian counter seeded randomly at startup.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(rand::random);
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff));

/// Opaque identifier for stored documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a new identifier
    pub fn generate() -> Self {
        let seconds = chrono::Utc::now().timestamp() as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parse the 24-character hex form
    ///
    /// Fails with [`Error::InvalidId`] for anything else, including the
    /// right number of characters with non-hex digits.
    pub fn parse(s: &str) -> Result<Self, Error> {
        if s.len() != 24 {
            return Err(Error::InvalidId(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| Error::InvalidId(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Creation time embedded in the identifier (Unix seconds)
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
