//! Annotation manager domain service.
//!
//! Coordinates the relational rows and the files on disk: files are written
//! before their rows are inserted and removed after their rows are deleted.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{
    AnnotationCommand, AnnotationRepository, AnnotationRepositoryError, BoxGenerator,
    ImageStore, ImageStoreError,
};
use crate::domain::{
    Annotation, AnnotationInput, BoxDraft, Error, Image, ImageUpload, NewImage, Project,
    ProjectName, ProjectNameError,
};

pub(super) const PROJECT_NOT_FOUND: &str = "Project not found";
pub(super) const IMAGE_NOT_FOUND: &str = "Image not found";
pub(super) const ANNOTATION_NOT_FOUND: &str = "Annotation not found";

/// Annotation service implementing the driving ports.
#[derive(Clone)]
pub struct AnnotationService<R, S, G> {
    pub(super) repo: Arc<R>,
    store: Arc<S>,
    generator: Arc<G>,
}

impl<R, S, G> AnnotationService<R, S, G> {
    /// Create a new service over the row repository, the file store and the
    /// box generator.
    pub fn new(repo: Arc<R>, store: Arc<S>, generator: Arc<G>) -> Self {
        Self {
            repo,
            store,
            generator,
        }
    }
}

pub(super) fn map_repository_error(error: AnnotationRepositoryError) -> Error {
    match error {
        AnnotationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("annotation repository unavailable: {message}"))
        }
        AnnotationRepositoryError::Query { message } => {
            Error::internal(format!("annotation repository error: {message}"))
        }
        AnnotationRepositoryError::MissingParent { message } => Error::not_found(message),
        AnnotationRepositoryError::Duplicate { message } => Error::conflict(message),
    }
}

fn map_store_error(error: ImageStoreError) -> Error {
    match error {
        ImageStoreError::Collision { message } => Error::conflict(message),
        ImageStoreError::InvalidName { message } | ImageStoreError::Io { message } => {
            Error::internal(format!("image storage failed: {message}"))
        }
    }
}

fn map_project_name_error(error: &ProjectNameError) -> Error {
    let details = match error {
        ProjectNameError::Empty => json!({ "field": "name", "code": "empty" }),
        ProjectNameError::TooLong { max, actual } => json!({
            "field": "name",
            "code": "too_long",
            "max": max,
            "actual": actual,
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn validate_uploads(uploads: &[ImageUpload]) -> Result<(), Error> {
    if uploads.is_empty() {
        return Err(Error::invalid_request("No files"));
    }
    for (index, upload) in uploads.iter().enumerate() {
        if !upload.is_image() {
            return Err(
                Error::invalid_request(format!("Not an image: {}", upload.display_filename()))
                    .with_details(json!({
                        "field": "files",
                        "index": index,
                        "contentType": upload.content_type,
                    })),
            );
        }
    }
    Ok(())
}

fn validate_boxes(annotations: Vec<AnnotationInput>) -> Result<Vec<BoxDraft>, Error> {
    annotations
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            BoxDraft::try_from(input).map_err(|err| {
                Error::invalid_request(format!("Annotation {index}: {err}")).with_details(json!({
                    "field": "class_name",
                    "index": index,
                    "code": "empty",
                }))
            })
        })
        .collect()
}

impl<R, S, G> AnnotationService<R, S, G>
where
    R: AnnotationRepository,
    S: ImageStore,
    G: BoxGenerator,
{
    pub(super) async fn require_project(&self, id: i32) -> Result<Project, Error> {
        self.repo
            .find_project(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(PROJECT_NOT_FOUND))
    }

    pub(super) async fn require_image(&self, id: i32) -> Result<Image, Error> {
        self.repo
            .find_image(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(IMAGE_NOT_FOUND))
    }

    /// Remove every named file, attempting all of them and reporting the
    /// first failure.
    async fn delete_files(&self, storage_names: &[String]) -> Result<(), Error> {
        let mut first_error = None;
        for name in storage_names {
            if let Err(err) = self.store.delete(name).await {
                warn!(storage_name = %name, error = %err, "failed to delete stored image");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), |err| Err(map_store_error(err)))
    }

    async fn store_one(&self, project_id: i32, upload: ImageUpload) -> Result<Image, Error> {
        let filename = upload.display_filename().to_owned();
        let mime_type = upload.content_type.clone().unwrap_or_default();
        let original = upload.filename.unwrap_or_default();
        let stored = self
            .store
            .store(&original, upload.bytes)
            .await
            .map_err(map_store_error)?;
        let size = i64::try_from(stored.size)
            .map_err(|_| Error::invalid_request(format!("File too large: {filename}")));
        let inserted = match size {
            Ok(size) => {
                let row = NewImage {
                    project_id,
                    filename,
                    mime_type,
                    size,
                    storage_name: stored.storage_name.clone(),
                };
                self.repo
                    .insert_image(&row)
                    .await
                    .map_err(map_repository_error)
            }
            Err(err) => Err(err),
        };
        if inserted.is_err() {
            if let Err(cleanup) = self.store.delete(&stored.storage_name).await {
                warn!(
                    storage_name = %stored.storage_name,
                    error = %cleanup,
                    "failed to remove orphaned upload"
                );
            }
        }
        inserted
    }
}

#[async_trait]
impl<R, S, G> AnnotationCommand for AnnotationService<R, S, G>
where
    R: AnnotationRepository,
    S: ImageStore,
    G: BoxGenerator,
{
    async fn create_project(&self, name: String) -> Result<Project, Error> {
        let name = ProjectName::new(&name).map_err(|err| map_project_name_error(&err))?;
        self.repo
            .insert_project(&name)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_project(&self, id: i32) -> Result<(), Error> {
        let storage_names = self
            .repo
            .delete_project(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(PROJECT_NOT_FOUND))?;
        self.delete_files(&storage_names).await
    }

    async fn upload_images(
        &self,
        project_id: i32,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<Image>, Error> {
        self.require_project(project_id).await?;
        validate_uploads(&uploads)?;

        let mut created = Vec::with_capacity(uploads.len());
        for upload in uploads {
            created.push(self.store_one(project_id, upload).await?);
        }
        Ok(created)
    }

    async fn delete_image(&self, id: i32) -> Result<(), Error> {
        let storage_name = self
            .repo
            .delete_image(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(IMAGE_NOT_FOUND))?;
        self.delete_files(std::slice::from_ref(&storage_name)).await
    }

    async fn replace_annotations(
        &self,
        image_id: i32,
        annotations: Vec<AnnotationInput>,
    ) -> Result<Vec<Annotation>, Error> {
        self.require_image(image_id).await?;
        let boxes = validate_boxes(annotations)?;
        self.repo
            .replace_annotations(image_id, &boxes)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_annotation(&self, id: i32) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete_annotation(id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(ANNOTATION_NOT_FOUND))
        }
    }

    async fn predict(&self, image_id: i32) -> Result<Vec<Annotation>, Error> {
        self.require_image(image_id).await?;
        let boxes = self.generator.generate();
        self.repo
            .append_annotations(image_id, &boxes)
            .await
            .map_err(map_repository_error)
    }
}
