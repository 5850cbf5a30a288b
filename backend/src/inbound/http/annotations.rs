//! Bounding-box annotation HTTP handlers.
//!
//! ```text
//! GET    /images/{id}/annotations
//! POST   /images/{id}/annotations   (replaces the full set)
//! DELETE /annotations/{id}
//! POST   /predict/{id}              (appends suggested boxes)
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Annotation, AnnotationInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// One submitted box. Coordinates are fractions of the image size.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AnnotationRequest {
    #[schema(example = 0.1)]
    pub x: f64,
    #[schema(example = 0.2)]
    pub y: f64,
    #[schema(example = 0.3)]
    pub w: f64,
    #[schema(example = 0.25)]
    pub h: f64,
    #[schema(example = "truck")]
    pub class_name: String,
}

impl From<AnnotationRequest> for AnnotationInput {
    fn from(value: AnnotationRequest) -> Self {
        Self {
            x: value.x,
            y: value.y,
            w: value.w,
            h: value.h,
            class_name: value.class_name,
        }
    }
}

/// Full replacement set for an image's annotations.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SaveAnnotationsRequest {
    pub annotations: Vec<AnnotationRequest>,
}

/// A stored box as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnnotationResponse {
    pub id: i32,
    pub image_id: i32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub class_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Annotation> for AnnotationResponse {
    fn from(value: Annotation) -> Self {
        Self {
            id: value.id,
            image_id: value.image_id,
            x: value.x,
            y: value.y,
            w: value.w,
            h: value.h,
            class_name: value.class_name,
            created_at: value.created_at,
        }
    }
}

fn to_responses(annotations: Vec<Annotation>) -> Vec<AnnotationResponse> {
    annotations
        .into_iter()
        .map(AnnotationResponse::from)
        .collect()
}

/// List an image's annotations in ascending id order.
#[utoipa::path(
    get,
    path = "/images/{id}/annotations",
    params(("id" = i32, Path, description = "Image id")),
    responses(
        (status = 200, description = "Annotations", body = [AnnotationResponse]),
        (status = 404, description = "Image not found", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "listAnnotations"
)]
#[get("/images/{id}/annotations")]
pub async fn list_annotations(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let annotations = state
        .annotations_query
        .list_annotations(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(to_responses(annotations)))
}

/// Replace every annotation of an image.
///
/// An empty list clears the image.
#[utoipa::path(
    post,
    path = "/images/{id}/annotations",
    params(("id" = i32, Path, description = "Image id")),
    request_body = SaveAnnotationsRequest,
    responses(
        (status = 201, description = "Stored annotations", body = [AnnotationResponse]),
        (status = 400, description = "Blank class name", body = ErrorSchema),
        (status = 404, description = "Image not found", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "saveAnnotations"
)]
#[post("/images/{id}/annotations")]
pub async fn save_annotations(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<SaveAnnotationsRequest>,
) -> ApiResult<HttpResponse> {
    let inputs = payload
        .into_inner()
        .annotations
        .into_iter()
        .map(AnnotationInput::from)
        .collect();
    let saved = state
        .annotations
        .replace_annotations(path.into_inner(), inputs)
        .await?;
    Ok(HttpResponse::Created().json(to_responses(saved)))
}

/// Delete one annotation.
#[utoipa::path(
    delete,
    path = "/annotations/{id}",
    params(("id" = i32, Path, description = "Annotation id")),
    responses(
        (status = 204, description = "Annotation deleted"),
        (status = 404, description = "Annotation not found", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "deleteAnnotation"
)]
#[delete("/annotations/{id}")]
pub async fn delete_annotation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.annotations.delete_annotation(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Generate suggested boxes and append them to an image's annotations.
///
/// Only the newly created boxes are returned.
#[utoipa::path(
    post,
    path = "/predict/{id}",
    params(("id" = i32, Path, description = "Image id")),
    responses(
        (status = 201, description = "Suggested annotations", body = [AnnotationResponse]),
        (status = 404, description = "Image not found", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "predictAnnotations"
)]
#[post("/predict/{id}")]
pub async fn predict(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let created = state.annotations.predict(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(to_responses(created)))
}

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod tests;
