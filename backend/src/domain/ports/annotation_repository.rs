//! Port for annotation manager persistence.
//!
//! Projects own images and images own annotations. Deleting a parent removes
//! its dependants in the same statement; the adapter reports the storage names
//! of removed images so the caller can delete the files.

use async_trait::async_trait;

use crate::domain::{Annotation, BoxDraft, Image, NewImage, Project, ProjectName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by annotation repository adapters.
    pub enum AnnotationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "annotation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "annotation repository query failed: {message}",
        /// A referenced parent row no longer exists.
        MissingParent { message: String } =>
            "referenced row is missing: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } =>
            "duplicate value: {message}",
    }
}

/// Port for project, image and annotation storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    /// Insert a project and return it with its generated id and timestamp.
    async fn insert_project(&self, name: &ProjectName)
    -> Result<Project, AnnotationRepositoryError>;

    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, AnnotationRepositoryError>;

    /// One project.
    async fn find_project(&self, id: i32) -> Result<Option<Project>, AnnotationRepositoryError>;

    /// Delete a project together with its images and annotations.
    ///
    /// Returns `None` when the project does not exist, otherwise the storage
    /// names of every image that was removed.
    async fn delete_project(
        &self,
        id: i32,
    ) -> Result<Option<Vec<String>>, AnnotationRepositoryError>;

    /// Images of one project, newest first.
    async fn list_images(&self, project_id: i32) -> Result<Vec<Image>, AnnotationRepositoryError>;

    /// Insert an image row for an already stored file.
    async fn insert_image(&self, image: &NewImage) -> Result<Image, AnnotationRepositoryError>;

    /// One image.
    async fn find_image(&self, id: i32) -> Result<Option<Image>, AnnotationRepositoryError>;

    /// Delete an image together with its annotations.
    ///
    /// Returns the storage name of the removed image, or `None` when it did
    /// not exist.
    async fn delete_image(&self, id: i32) -> Result<Option<String>, AnnotationRepositoryError>;

    /// Annotations of one image in ascending id order.
    async fn list_annotations(
        &self,
        image_id: i32,
    ) -> Result<Vec<Annotation>, AnnotationRepositoryError>;

    /// Atomically replace every annotation of an image with `boxes`.
    async fn replace_annotations(
        &self,
        image_id: i32,
        boxes: &[BoxDraft],
    ) -> Result<Vec<Annotation>, AnnotationRepositoryError>;

    /// Add `boxes` to the annotations of an image.
    async fn append_annotations(
        &self,
        image_id: i32,
        boxes: &[BoxDraft],
    ) -> Result<Vec<Annotation>, AnnotationRepositoryError>;

    /// Delete one annotation. Returns `false` when it did not exist.
    async fn delete_annotation(&self, id: i32) -> Result<bool, AnnotationRepositoryError>;
}
