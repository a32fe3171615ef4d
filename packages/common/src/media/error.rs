use thiserror::Error;

/// Errors that can occur while storing or retrieving media objects.
#[derive(Debug, Error)]
pub enum MediaError {
    /// No object with the given content hash exists in the store.
    #[error("media object not found: {0}")]
    NotFound(String),

    #[error("media IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The given string is not a valid hex-encoded content hash.
    #[error("invalid media hash: {0}")]
    InvalidHash(String),

    /// The object exceeds the store's configured size limit.
    #[error("media object exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge { actual: u64, limit: u64 },
}
