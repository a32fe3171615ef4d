use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::error::MediaError;
use super::hash::MediaHash;
use super::store::{BoxReader, MediaStore};

/// Filesystem-backed media store.
///
/// Objects live in a sharded layout, `{root}/{first 2 hex chars}/{remaining
/// 62 hex chars}`. Writes go through `{root}/.tmp` and are renamed into
/// place, so a crash never leaves a partially written object at its final
/// path.
pub struct FilesystemMediaStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemMediaStore {
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, MediaError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self { root, max_size })
    }

    fn object_path(&self, hash: &MediaHash) -> PathBuf {
        let (prefix, suffix) = hash.shard();
        self.root.join(prefix).join(suffix)
    }

    fn staging_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl MediaStore for FilesystemMediaStore {
    async fn put(&self, data: &[u8]) -> Result<MediaHash, MediaError> {
        if data.len() as u64 > self.max_size {
            return Err(MediaError::TooLarge {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let hash = MediaHash::compute(data);
        let object_path = self.object_path(&hash);

        // Content-addressed: identical bytes are already on disk.
        if fs::try_exists(&object_path).await? {
            return Ok(hash);
        }

        let staging = self.staging_path();
        if let Err(e) = fs::write(&staging, data).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&staging, &object_path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        tracing::debug!(hash = %hash, size = data.len(), "stored media object");
        Ok(hash)
    }

    async fn open(&self, hash: &MediaHash) -> Result<BoxReader, MediaError> {
        match fs::File::open(self.object_path(hash)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaError::NotFound(hash.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, hash: &MediaHash) -> Result<bool, MediaError> {
        Ok(fs::try_exists(self.object_path(hash)).await?)
    }

    async fn delete(&self, hash: &MediaHash) -> Result<bool, MediaError> {
        match fs::remove_file(self.object_path(hash)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn len(&self, hash: &MediaHash) -> Result<u64, MediaError> {
        match fs::metadata(self.object_path(hash)).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaError::NotFound(hash.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
