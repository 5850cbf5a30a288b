//! Query implementation for the annotation service.

use async_trait::async_trait;

use crate::domain::ports::{AnnotationQuery, AnnotationRepository, BoxGenerator, ImageStore};
use crate::domain::{Annotation, Error, Image, Project};

use super::service::{AnnotationService, map_repository_error};

#[async_trait]
impl<R, S, G> AnnotationQuery for AnnotationService<R, S, G>
where
    R: AnnotationRepository,
    S: ImageStore,
    G: BoxGenerator,
{
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        self.repo.list_projects().await.map_err(map_repository_error)
    }

    async fn list_images(&self, project_id: i32) -> Result<Vec<Image>, Error> {
        self.require_project(project_id).await?;
        self.repo
            .list_images(project_id)
            .await
            .map_err(map_repository_error)
    }

    async fn list_annotations(&self, image_id: i32) -> Result<Vec<Annotation>, Error> {
        self.require_image(image_id).await?;
        self.repo
            .list_annotations(image_id)
            .await
            .map_err(map_repository_error)
    }
}
