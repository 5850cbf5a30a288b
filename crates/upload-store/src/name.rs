//! Storage name generation and validation.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Component, Utf8Path};
use uuid::Uuid;

use crate::error::UploadStoreError;

/// Name of a file inside the upload directory.
///
/// A valid name is exactly one normal path component that does not start
/// with a dot. Dot-prefixed names are reserved for in-flight temporary files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageName(String);

impl StorageName {
    /// Generate a fresh random name for an upload.
    ///
    /// The name is a UUID v4 rendered as 32 lowercase hex characters followed
    /// by the lower-cased extension of `original_filename`. Extensions that
    /// are not purely ASCII alphanumeric are dropped, so every generated name
    /// passes [`StorageName::parse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use upload_store::StorageName;
    ///
    /// let name = StorageName::generate("Truck.JPG");
    /// assert!(name.as_str().ends_with(".jpg"));
    /// assert_eq!(name.as_str().len(), 36);
    /// ```
    #[must_use]
    pub fn generate(original_filename: &str) -> Self {
        let stem = Uuid::new_v4().simple();
        let extension = Utf8Path::new(original_filename)
            .extension()
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        Self(format!("{stem}{extension}"))
    }

    /// Validate an externally supplied name.
    ///
    /// # Errors
    ///
    /// Returns [`UploadStoreError::InvalidName`] when the name is empty,
    /// contains a path separator or parent reference, or starts with a dot.
    pub fn parse(value: impl Into<String>) -> Result<Self, UploadStoreError> {
        let name: String = value.into();
        let reason = {
            let mut components = Utf8Path::new(&name).components();
            match (components.next(), components.next()) {
                _ if name.is_empty() => Some("must not be empty"),
                _ if name.contains(['/', '\\']) => Some("must not contain path separators"),
                _ if name.starts_with('.') => Some("must not start with a dot"),
                (Some(Utf8Component::Normal(_)), None) => None,
                _ => Some("must be a single path component"),
            }
        };
        if let Some(why) = reason {
            return Err(UploadStoreError::InvalidName { name, reason: why });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for StorageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StorageName {
    type Err = UploadStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StorageName {
    type Error = UploadStoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("photo.PNG", Some("png"))]
    #[case("archive.tar.GZ", Some("gz"))]
    #[case("noext", None)]
    #[case(".bashrc", None)]
    #[case("", None)]
    #[case("truck.p\\ng", None)]
    #[case("truck.p ng", None)]
    #[case("truck.pñg", None)]
    fn generated_names_keep_lowercased_extension(
        #[case] original: &str,
        #[case] expected: Option<&str>,
    ) {
        let name = StorageName::generate(original);
        let path = Utf8Path::new(name.as_str());

        assert_eq!(path.extension(), expected);
        let stem = path.file_stem().unwrap_or_default();
        assert_eq!(stem.len(), 32);
        assert!(stem.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[rstest]
    fn generated_names_are_distinct() {
        assert_ne!(StorageName::generate("a.png"), StorageName::generate("a.png"));
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case(".")]
    #[case("../escape.png")]
    #[case("nested/file.png")]
    #[case("back\\slash.png")]
    #[case("/absolute.png")]
    #[case(".hidden.tmp")]
    fn rejects_names_outside_the_flat_directory(#[case] raw: &str) {
        assert!(matches!(
            StorageName::parse(raw),
            Err(UploadStoreError::InvalidName { .. })
        ));
    }

    #[rstest]
    #[case("x.jpeg")]
    #[case("truck.p\\ng")]
    #[case("..\\..\\evil")]
    #[case("dir/sub.tar.g:z")]
    #[case(".hidden")]
    fn generated_names_always_parse(#[case] original: &str) {
        let generated = StorageName::generate(original);
        let parsed = StorageName::parse(generated.as_str());
        assert!(matches!(parsed, Ok(ref name) if *name == generated));
    }
}
