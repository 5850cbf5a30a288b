//! Flat-directory store for uploaded files.
//!
//! Every file lives directly inside one directory under a random
//! [`StorageName`]. Writes go to a hidden temporary file first and are then
//! renamed into place, so readers never observe a partially written upload.
//! All access is confined to the opened directory through `cap-std`.
//!
//! # Example
//!
//! ```
//! use camino::Utf8Path;
//! use upload_store::UploadStore;
//!
//! let tmp = tempfile::tempdir().expect("temp dir");
//! let root = Utf8Path::from_path(tmp.path()).expect("utf-8 temp path");
//! let store = UploadStore::open(root).expect("open store");
//!
//! let stored = store.store("truck.png", b"\x89PNG").expect("store file");
//! assert_eq!(stored.size, 4);
//!
//! store.delete(&stored.name).expect("delete file");
//! store.delete(&stored.name).expect("second delete is a no-op");
//! ```

mod error;
mod name;

use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

pub use error::UploadStoreError;
pub use name::StorageName;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A file that has been written into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name the file was stored under.
    pub name: StorageName,
    /// Number of bytes written.
    pub size: u64,
}

/// Handle to the upload directory.
#[derive(Debug)]
pub struct UploadStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl UploadStore {
    /// Open `root`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::Open`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path) -> Result<Self, UploadStoreError> {
        let open_error = |source| UploadStoreError::Open {
            path: root.to_path_buf(),
            source,
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Directory the store was opened on.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` under a freshly generated name derived from
    /// `original_filename`.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::Collision`] if the generated name is
    /// already taken and [`UploadStoreError::Write`] on I/O failure. No
    /// temporary file is left behind on error.
    pub fn store(
        &self,
        original_filename: &str,
        contents: &[u8],
    ) -> Result<StoredFile, UploadStoreError> {
        let name = StorageName::generate(original_filename);
        let write_error = |source| UploadStoreError::Write {
            name: name.to_string(),
            source,
        };
        if self.dir.try_exists(name.as_str()).map_err(write_error)? {
            return Err(UploadStoreError::Collision {
                name: name.into_inner(),
            });
        }

        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{name}.tmp.{}.{counter}", process::id());
        self.write_temp(&tmp_name, contents).map_err(write_error)?;
        if let Err(err) = self.dir.rename(&tmp_name, &self.dir, name.as_str()) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(write_error(err));
        }
        sync_directory(&self.dir);

        Ok(StoredFile {
            size: contents.len() as u64,
            name,
        })
    }

    /// Read a stored file back into memory.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::Read`] if the file is missing or
    /// unreadable.
    pub fn read(&self, name: &StorageName) -> Result<Vec<u8>, UploadStoreError> {
        self.dir
            .read(name.as_str())
            .map_err(|source| UploadStoreError::Read {
                name: name.to_string(),
                source,
            })
    }

    /// Report whether a file with `name` exists.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::Read`] if existence cannot be determined.
    pub fn contains(&self, name: &StorageName) -> Result<bool, UploadStoreError> {
        self.dir
            .try_exists(name.as_str())
            .map_err(|source| UploadStoreError::Read {
                name: name.to_string(),
                source,
            })
    }

    /// Remove a stored file. A file that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::Delete`] for any failure other than
    /// absence.
    pub fn delete(&self, name: &StorageName) -> Result<(), UploadStoreError> {
        match self.dir.remove_file(name.as_str()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(UploadStoreError::Delete {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn write_temp(&self, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        let written = file.write_all(contents).and_then(|()| file.sync_all());
        if written.is_err() {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
        }
        written
    }
}

/// Best-effort; some platforms cannot fsync a directory handle.
fn sync_directory(dir: &Dir) {
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
