//! PostgreSQL-backed `AnnotationRepository` implementation using Diesel ORM.
//!
//! Child rows are removed by `ON DELETE CASCADE` foreign keys, so deleting a
//! project or image is a single statement. Multi-statement operations run
//! inside one transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection};

use crate::domain::ports::{AnnotationRepository, AnnotationRepositoryError};
use crate::domain::{Annotation, BoxDraft, Image, NewImage, Project, ProjectName};
use crate::{query_optional, query_vec};

use super::diesel_helpers::annotations::{map_diesel_error, map_pool_error};
use super::models::{
    AnnotationRow, ImageRow, NewAnnotationRow, NewImageRow, NewProjectRow, ProjectRow,
};
use super::pool::DbPool;
use super::schema::{annotations, images, projects};

/// Diesel-backed implementation of the `AnnotationRepository` port.
#[derive(Clone)]
pub struct DieselAnnotationRepository {
    pool: DbPool,
}

impl DieselAnnotationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn new_annotation_rows(image_id: i32, boxes: &[BoxDraft]) -> Vec<NewAnnotationRow<'_>> {
    boxes
        .iter()
        .map(|draft| NewAnnotationRow {
            image_id,
            x: draft.x,
            y: draft.y,
            w: draft.w,
            h: draft.h,
            class_name: draft.class_name.as_ref(),
        })
        .collect()
}

/// Insert `boxes` for an image and return the stored rows in id order.
async fn insert_boxes(
    conn: &mut AsyncPgConnection,
    image_id: i32,
    boxes: &[BoxDraft],
) -> Result<Vec<AnnotationRow>, diesel::result::Error> {
    if boxes.is_empty() {
        return Ok(Vec::new());
    }
    let mut rows: Vec<AnnotationRow> = diesel::insert_into(annotations::table)
        .values(new_annotation_rows(image_id, boxes))
        .returning(AnnotationRow::as_returning())
        .get_results(conn)
        .await?;
    rows.sort_by_key(|row| row.id);
    Ok(rows)
}

#[async_trait]
impl AnnotationRepository for DieselAnnotationRepository {
    async fn insert_project(
        &self,
        name: &ProjectName,
    ) -> Result<Project, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ProjectRow = diesel::insert_into(projects::table)
            .values(NewProjectRow {
                name: name.as_ref(),
            })
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProjectRow> = projects::table
            .select(ProjectRow::as_select())
            .order_by(projects::id.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_project(&self, id: i32) -> Result<Option<Project>, AnnotationRepositoryError> {
        query_optional!(
            self,
            annotations,
            projects::table,
            projects::id.eq(id),
            ProjectRow,
            Project::from
        )
    }

    async fn delete_project(
        &self,
        id: i32,
    ) -> Result<Option<Vec<String>>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let storage_names: Vec<String> = images::table
                    .filter(images::project_id.eq(id))
                    .select(images::storage_name)
                    .order_by(images::id.asc())
                    .load(conn)
                    .await?;

                let deleted = diesel::delete(projects::table.filter(projects::id.eq(id)))
                    .execute(conn)
                    .await?;

                Ok::<_, diesel::result::Error>((deleted > 0).then_some(storage_names))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_images(&self, project_id: i32) -> Result<Vec<Image>, AnnotationRepositoryError> {
        query_vec!(
            self,
            annotations,
            images::table,
            images::project_id.eq(project_id),
            images::id.desc(),
            ImageRow,
            Image::from
        )
    }

    async fn insert_image(&self, image: &NewImage) -> Result<Image, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ImageRow = diesel::insert_into(images::table)
            .values(NewImageRow {
                project_id: image.project_id,
                filename: &image.filename,
                mime_type: &image.mime_type,
                size: image.size,
                storage_name: &image.storage_name,
            })
            .returning(ImageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn find_image(&self, id: i32) -> Result<Option<Image>, AnnotationRepositoryError> {
        query_optional!(
            self,
            annotations,
            images::table,
            images::id.eq(id),
            ImageRow,
            Image::from
        )
    }

    async fn delete_image(&self, id: i32) -> Result<Option<String>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(images::table.filter(images::id.eq(id)))
            .returning(images::storage_name)
            .get_result::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn list_annotations(
        &self,
        image_id: i32,
    ) -> Result<Vec<Annotation>, AnnotationRepositoryError> {
        query_vec!(
            self,
            annotations,
            annotations::table,
            annotations::image_id.eq(image_id),
            annotations::id.asc(),
            AnnotationRow,
            Annotation::from
        )
    }

    async fn replace_annotations(
        &self,
        image_id: i32,
        boxes: &[BoxDraft],
    ) -> Result<Vec<Annotation>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(annotations::table.filter(annotations::image_id.eq(image_id)))
                        .execute(conn)
                        .await?;
                    insert_boxes(conn, image_id, boxes).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Annotation::from).collect())
    }

    async fn append_annotations(
        &self,
        image_id: i32,
        boxes: &[BoxDraft],
    ) -> Result<Vec<Annotation>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = insert_boxes(&mut conn, image_id, boxes)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Annotation::from).collect())
    }

    async fn delete_annotation(&self, id: i32) -> Result<bool, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(annotations::table.filter(annotations::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
