//! Driving port for annotation manager mutations.

use async_trait::async_trait;

use crate::domain::{Annotation, AnnotationInput, Error, Image, ImageUpload, Project};

/// Domain use-case port for creating and removing projects, images and
/// annotations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationCommand: Send + Sync {
    /// Create a project from a raw, untrimmed name.
    async fn create_project(&self, name: String) -> Result<Project, Error>;

    /// Delete a project, its images, their annotations and their files.
    async fn delete_project(&self, id: i32) -> Result<(), Error>;

    /// Store uploaded files and record them as images of a project.
    ///
    /// The whole batch is validated before anything is written.
    async fn upload_images(
        &self,
        project_id: i32,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<Image>, Error>;

    /// Delete an image, its annotations and its file.
    async fn delete_image(&self, id: i32) -> Result<(), Error>;

    /// Replace the full annotation set of an image.
    async fn replace_annotations(
        &self,
        image_id: i32,
        annotations: Vec<AnnotationInput>,
    ) -> Result<Vec<Annotation>, Error>;

    /// Delete a single annotation.
    async fn delete_annotation(&self, id: i32) -> Result<(), Error>;

    /// Generate suggested boxes for an image and append them to its
    /// annotations.
    async fn predict(&self, image_id: i32) -> Result<Vec<Annotation>, Error>;
}
