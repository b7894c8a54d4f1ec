//! Storage error types.

/// Errors that can occur when reading or writing the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Writing would exceed the store's size limit
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Backing file could not be read or written
    #[error("storage I/O error: {message}")]
    Io { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StorageError::QuotaExceeded {
            needed: 120,
            quota: 100,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: 120 bytes needed, 100 allowed"
        );

        let err = StorageError::Io {
            message: "disk full".into(),
        };
        assert_eq!(err.to_string(), "storage I/O error: disk full");
    }
}
