//! File-system adapter for the `ImageStore` port.
//!
//! Delegates to [`upload_store::UploadStore`]. The store performs blocking
//! I/O, so every call is moved onto Tokio's blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use camino::Utf8Path;
use upload_store::{StorageName, UploadStore, UploadStoreError};

use crate::domain::ports::{ImageStore, ImageStoreError, StoredImage};

/// Image store writing uploads into a flat directory.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    inner: Arc<UploadStore>,
}

impl FsImageStore {
    /// Open (creating if needed) the upload directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`UploadStoreError`] when the directory cannot
    /// be created or opened.
    pub fn open(root: &Utf8Path) -> Result<Self, UploadStoreError> {
        Ok(Self {
            inner: Arc::new(UploadStore::open(root)?),
        })
    }

    /// Directory that stored files are served from.
    pub fn root(&self) -> &Utf8Path {
        self.inner.root()
    }
}

fn map_store_error(error: UploadStoreError) -> ImageStoreError {
    match error {
        UploadStoreError::InvalidName { .. } => ImageStoreError::invalid_name(error.to_string()),
        UploadStoreError::Collision { .. } => ImageStoreError::collision(error.to_string()),
        UploadStoreError::Open { .. }
        | UploadStoreError::Write { .. }
        | UploadStoreError::Read { .. }
        | UploadStoreError::Delete { .. } => ImageStoreError::io(error.to_string()),
    }
}

fn map_join_error(error: tokio::task::JoinError) -> ImageStoreError {
    ImageStoreError::io(format!("storage task failed: {error}"))
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(
        &self,
        original_filename: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, ImageStoreError> {
        let store = Arc::clone(&self.inner);
        let original = original_filename.to_owned();
        let stored = tokio::task::spawn_blocking(move || store.store(&original, &bytes))
            .await
            .map_err(map_join_error)?
            .map_err(map_store_error)?;

        Ok(StoredImage {
            storage_name: stored.name.into_inner(),
            size: stored.size,
        })
    }

    async fn delete(&self, storage_name: &str) -> Result<(), ImageStoreError> {
        let name = StorageName::parse(storage_name).map_err(map_store_error)?;
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || store.delete(&name))
            .await
            .map_err(map_join_error)?
            .map_err(map_store_error)
    }
}
