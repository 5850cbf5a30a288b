//! Annotation manager: projects, uploaded images and bounding boxes.
//!
//! A project owns images and an image owns annotations; deleting a parent
//! removes its children. Box coordinates are normalised to the image size but
//! the bounds are advisory and not enforced.

use chrono::{DateTime, Utc};
use thiserror::Error;

mod predict;
mod query_impl;
pub mod service;
#[cfg(test)]
mod tests;

pub use predict::{
    PREDICTED_BOX_COUNT, PREDICTED_CLASS_RANGE, PREDICTED_SIZE_RANGE, RandomBoxGenerator,
    generate_boxes,
};
pub use service::AnnotationService;

/// Fallback filename recorded when an upload arrives without one.
pub const DEFAULT_IMAGE_FILENAME: &str = "image";

/// A named collection of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Primary key.
    pub id: i32,
    /// Trimmed, non-empty name.
    pub name: String,
    /// Creation time assigned by the database.
    pub created_at: DateTime<Utc>,
}

/// Validation errors for [`ProjectName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectNameError {
    /// The name was blank once trimmed.
    #[error("Project name is empty")]
    Empty,
    /// The trimmed name exceeded the length limit.
    #[error("Project name must be at most {max} characters, got {actual}")]
    TooLong {
        /// Maximum allowed characters.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },
}

/// Validated project name.
///
/// # Examples
/// ```
/// use depot::domain::ProjectName;
///
/// let name = ProjectName::new("  Fleet A ").expect("valid name");
/// assert_eq!(name.as_ref(), "Fleet A");
/// assert!(ProjectName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Maximum length in characters after trimming.
    pub const MAX_CHARS: usize = 200;

    /// Trim `raw` and validate the result.
    pub fn new(raw: &str) -> Result<Self, ProjectNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectNameError::Empty);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(ProjectNameError::TooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An uploaded image belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Primary key.
    pub id: i32,
    /// Owning project.
    pub project_id: i32,
    /// Filename supplied by the client.
    pub filename: String,
    /// MIME type supplied by the client; starts with `image/`.
    pub mime_type: String,
    /// Size of the stored file in bytes.
    pub size: i64,
    /// Name of the stored file, unique across all images.
    pub storage_name: String,
    /// Creation time assigned by the database.
    pub created_at: DateTime<Utc>,
}

/// Image row to insert once its file has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    /// Owning project.
    pub project_id: i32,
    /// Filename supplied by the client.
    pub filename: String,
    /// MIME type supplied by the client.
    pub mime_type: String,
    /// Size of the stored file in bytes.
    pub size: i64,
    /// Name of the stored file.
    pub storage_name: String,
}

/// A file received from a client, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client filename, if any.
    pub filename: Option<String>,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Filename to record, substituting [`DEFAULT_IMAGE_FILENAME`] when the
    /// client sent none.
    pub fn display_filename(&self) -> &str {
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_IMAGE_FILENAME)
    }

    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("image/"))
    }
}

/// A stored bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Primary key.
    pub id: i32,
    /// Annotated image.
    pub image_id: i32,
    /// Left edge, normalised.
    pub x: f64,
    /// Top edge, normalised.
    pub y: f64,
    /// Width, normalised.
    pub w: f64,
    /// Height, normalised.
    pub h: f64,
    /// Trimmed label.
    pub class_name: String,
    /// Creation time assigned by the database.
    pub created_at: DateTime<Utc>,
}

/// A bounding box as submitted by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationInput {
    /// Left edge, normalised.
    pub x: f64,
    /// Top edge, normalised.
    pub y: f64,
    /// Width, normalised.
    pub w: f64,
    /// Height, normalised.
    pub h: f64,
    /// Untrimmed label.
    pub class_name: String,
}

/// Validation error for [`ClassName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("class name must not be empty")]
pub struct EmptyClassName;

/// Trimmed, non-empty annotation label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName(String);

impl ClassName {
    /// Trim `raw` and reject blank labels.
    pub fn new(raw: &str) -> Result<Self, EmptyClassName> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyClassName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Label for the `n`th predicted object class.
    pub(crate) fn predicted(n: u8) -> Self {
        Self(format!("ML_obj_{n}"))
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated bounding box ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDraft {
    /// Left edge, normalised.
    pub x: f64,
    /// Top edge, normalised.
    pub y: f64,
    /// Width, normalised.
    pub w: f64,
    /// Height, normalised.
    pub h: f64,
    /// Label.
    pub class_name: ClassName,
}

impl TryFrom<AnnotationInput> for BoxDraft {
    type Error = EmptyClassName;

    fn try_from(input: AnnotationInput) -> Result<Self, Self::Error> {
        Ok(Self {
            x: input.x,
            y: input.y,
            w: input.w,
            h: input.h,
            class_name: ClassName::new(&input.class_name)?,
        })
    }
}
