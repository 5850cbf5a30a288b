//! Port for storing uploaded image bytes.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image store adapters.
    pub enum ImageStoreError {
        /// The storage name does not address a file inside the store.
        InvalidName { message: String } =>
            "invalid storage name: {message}",
        /// A freshly generated storage name was already taken.
        Collision { message: String } =>
            "storage name collision: {message}",
        /// Reading or writing the underlying storage failed.
        Io { message: String } =>
            "image storage failed: {message}",
    }
}

/// Outcome of storing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Name under which the file can later be served or deleted.
    pub storage_name: String,
    /// Number of bytes written.
    pub size: u64,
}

/// Port for file storage of uploaded images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under a fresh random name that keeps the lower-cased
    /// extension of `original_filename`.
    async fn store(
        &self,
        original_filename: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, ImageStoreError>;

    /// Remove a stored file. Removing a missing file succeeds.
    async fn delete(&self, storage_name: &str) -> Result<(), ImageStoreError>;
}
