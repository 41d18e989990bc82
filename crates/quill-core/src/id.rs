//! Time-sortable 160-bit identifiers.
//!
//! An [`Id`] is 20 bytes: a big-endian `u32` holding seconds since
//! [`EPOCH`], followed by 16 random bytes. Comparing the raw bytes orders ids
//! by creation time, which is what lets a post id double as a pagination
//! cursor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svix_ksuid::{Ksuid, KsuidLike};
use thiserror::Error;

/// Unix timestamp (seconds) that the embedded timestamp counts from.
pub const EPOCH: i64 = 1_400_000_000;

/// Width of the binary form.
pub const ID_LEN: usize = 20;

/// Width of the base62 text form (KSUID encoding).
pub const STRING_LEN: usize = 27;

const TIMESTAMP_LEN: usize = 4;
const PAYLOAD_LEN: usize = ID_LEN - TIMESTAMP_LEN;

/// Identifier decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid id length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid character {0:?} in id")]
    InvalidCharacter(char),

    #[error("malformed id: {0}")]
    Malformed(String),
}

/// Globally unique, creation-ordered identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Id([u8; ID_LEN]);

impl Id {
    /// Generate a fresh id stamped with the current wall-clock time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Generate a fresh id stamped with `time`.
    ///
    /// Times before [`EPOCH`] saturate to one second past it, so a generated
    /// id is never [`Id::nil`].
    pub fn at(time: DateTime<Utc>) -> Self {
        let offset = (time.timestamp() - EPOCH).clamp(1, i64::from(u32::MAX)) as u32;

        let mut payload = [0u8; PAYLOAD_LEN];
        rand::rng().fill_bytes(&mut payload);

        Self::from_parts(offset, payload)
    }

    /// Build an id from an epoch offset (seconds since [`EPOCH`]) and payload.
    pub fn from_parts(timestamp: u32, payload: [u8; PAYLOAD_LEN]) -> Self {
        let mut bytes = [0u8; ID_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&timestamp.to_be_bytes());
        bytes[TIMESTAMP_LEN..].copy_from_slice(&payload);
        Self(bytes)
    }

    /// The reserved "absent" value.
    pub const fn nil() -> Self {
        Self([0u8; ID_LEN])
    }

    pub fn is_nil(&self) -> bool {
        self.0 == [0u8; ID_LEN]
    }

    /// Decode the fixed-width binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdError> {
        let bytes: [u8; ID_LEN] = bytes.try_into().map_err(|_| IdError::InvalidLength {
            expected: ID_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Seconds since [`EPOCH`].
    pub fn epoch_offset(&self) -> u32 {
        let mut raw = [0u8; TIMESTAMP_LEN];
        raw.copy_from_slice(&self.0[..TIMESTAMP_LEN]);
        u32::from_be_bytes(raw)
    }

    /// Creation time embedded in the id.
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(EPOCH + i64::from(self.epoch_offset()), 0)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn payload(&self) -> &[u8] {
        &self.0[TIMESTAMP_LEN..]
    }

    /// `None` for the nil id, used where nil means "no bound".
    pub fn non_nil(self) -> Option<Self> {
        if self.is_nil() { None } else { Some(self) }
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != STRING_LEN {
            return Err(IdError::InvalidLength {
                expected: STRING_LEN,
                actual: s.len(),
            });
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(IdError::InvalidCharacter(c));
        }

        let ksuid = Ksuid::from_base62(s).map_err(|e| IdError::Malformed(e.to_string()))?;
        Self::from_bytes(ksuid.bytes())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = Ksuid::from_bytes(self.0).to_base62();
        write!(f, "{:0>width$}", encoded, width = STRING_LEN)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self)
    }
}

impl TryFrom<&[u8]> for Id {
    type Error = IdError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for Id {
    type Error = IdError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl AsRef<[u8]> for Id {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
