use std::fmt;

use sha2::{Digest, Sha256};

use super::error::MediaError;

/// SHA-256 content hash identifying a stored media object.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaHash([u8; 32]);

impl MediaHash {
    /// Hash the given bytes.
    pub fn compute(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, MediaError> {
        if s.len() != 64 {
            return Err(MediaError::InvalidHash(format!(
                "expected 64 hex characters, got {}",
                s.len()
            )));
        }

        let bytes =
            hex::decode(s).map_err(|e| MediaError::InvalidHash(format!("invalid hex: {e}")))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| MediaError::InvalidHash("decoded to wrong length".into()))?;

        Ok(Self(arr))
    }

    /// Lowercase hex form, as persisted in the database.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Split into the sharded on-disk layout: 2-char directory prefix
    /// and 62-char filename.
    pub fn shard(&self) -> (String, String) {
        (hex::encode(&self.0[..1]), hex::encode(&self.0[1..]))
    }
}

impl fmt::Debug for MediaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaHash({})", self.to_hex())
    }
}

impl fmt::Display for MediaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
