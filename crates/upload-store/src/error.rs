//! Error types for the upload store.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while opening the store or touching stored files.
#[derive(Debug, Error)]
pub enum UploadStoreError {
    /// A storage name was not a single plain path component.
    #[error("invalid storage name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The upload directory could not be created or opened.
    #[error("failed to open upload directory '{path}': {source}")]
    Open {
        /// Directory that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A file could not be written or renamed into place.
    #[error("failed to write '{name}': {source}")]
    Write {
        /// Storage name being written.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A file could not be read back.
    #[error("failed to read '{name}': {source}")]
    Read {
        /// Storage name being read.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A file could not be removed for a reason other than absence.
    #[error("failed to delete '{name}': {source}")]
    Delete {
        /// Storage name being deleted.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A generated storage name is already occupied.
    #[error("storage name '{name}' is already in use")]
    Collision {
        /// The occupied name.
        name: String,
    },
}
