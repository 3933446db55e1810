//! Captured photo handed over by the photo-acquisition side

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Encoded image produced after a shutter release.
/// The bytes are opaque to the engine. Only `bytes` is read from the wire;
/// digest and timestamp are always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PhotoBytes")]
pub struct CapturedPhoto {
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`
    pub digest: String,
    pub captured_at: DateTime<Utc>,
}

impl CapturedPhoto {
    pub fn new(bytes: Vec<u8>) -> Self {
        let digest = Sha256::digest(&bytes)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self {
            bytes,
            digest,
            captured_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// First 8 hex chars of the digest, for thumbnails and logs
    pub fn short_digest(&self) -> &str {
        self.digest.get(..8).unwrap_or(&self.digest)
    }
}

#[derive(Deserialize)]
struct PhotoBytes {
    bytes: Vec<u8>,
}

impl From<PhotoBytes> for CapturedPhoto {
    fn from(raw: PhotoBytes) -> Self {
        CapturedPhoto::new(raw.bytes)
    }
}

/// Fire-and-forget signal for the photo-acquisition side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutterReleased {
    pub at: DateTime<Utc>,
    /// Dispatch number that released the shutter
    pub dispatch: u64,
}
