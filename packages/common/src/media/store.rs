use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::MediaError;
use super::hash::MediaHash;

/// Boxed async reader returned when opening a stored object.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Content-addressed media storage.
///
/// Objects are identified solely by the SHA-256 hash of their content;
/// storing the same bytes twice yields the same hash and a single copy.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the given bytes and return their content hash.
    async fn put(&self, data: &[u8]) -> Result<MediaHash, MediaError>;

    /// Open a stored object for streaming reads.
    async fn open(&self, hash: &MediaHash) -> Result<BoxReader, MediaError>;

    /// Whether an object with this hash exists.
    async fn exists(&self, hash: &MediaHash) -> Result<bool, MediaError>;

    /// Remove an object. Returns `false` if it did not exist.
    async fn delete(&self, hash: &MediaHash) -> Result<bool, MediaError>;

    /// Size of a stored object in bytes.
    async fn len(&self, hash: &MediaHash) -> Result<u64, MediaError>;
}
