//! Driving port for annotation manager reads.

use async_trait::async_trait;

use crate::domain::{Annotation, Error, Image, Project};

/// Domain use-case port for listing projects, images and annotations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationQuery: Send + Sync {
    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, Error>;

    /// Images of a project, newest first. Fails with `not_found` when the
    /// project does not exist.
    async fn list_images(&self, project_id: i32) -> Result<Vec<Image>, Error>;

    /// Annotations of an image in ascending id order. Fails with
    /// `not_found` when the image does not exist.
    async fn list_annotations(&self, image_id: i32) -> Result<Vec<Annotation>, Error>;
}
