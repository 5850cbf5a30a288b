//! Image upload HTTP handlers.
//!
//! ```text
//! GET    /projects/{id}/images
//! POST   /projects/{id}/images   (multipart/form-data, repeated `files` field)
//! DELETE /images/{id}
//! ```
//!
//! Stored files are served by the static `/uploads` mount; responses carry a
//! ready-made `url` built from the request's scheme and host.

use actix_multipart::{Field, Multipart};
use actix_web::dev::ConnectionInfo;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use futures_util::StreamExt as _;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, Image, ImageUpload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{file_too_large_error, invalid_multipart_error};

/// Multipart field carrying uploaded files.
pub const FILES_FIELD: &str = "files";

/// Path prefix the upload directory is mounted under.
pub const UPLOADS_PATH: &str = "/uploads";

/// An uploaded image as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub id: i32,
    pub project_id: i32,
    #[schema(example = "truck.jpg")]
    pub filename: String,
    #[schema(example = "image/jpeg")]
    pub mime_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
    /// Absolute URL of the stored file.
    #[schema(example = "http://localhost:8000/uploads/0f8e1c2d3b4a59687766554433221100.jpg")]
    pub url: String,
}

impl ImageResponse {
    fn new(image: Image, base_url: &str) -> Self {
        let url = format!("{base_url}{UPLOADS_PATH}/{}", image.storage_name);
        Self {
            id: image.id,
            project_id: image.project_id,
            filename: image.filename,
            mime_type: image.mime_type,
            size: image.size,
            created_at: image.created_at,
            url,
        }
    }
}

fn base_url(info: &ConnectionInfo) -> String {
    format!("{}://{}", info.scheme(), info.host())
}

fn respond_with(images: Vec<Image>, req: &HttpRequest) -> Vec<ImageResponse> {
    let base = base_url(&req.connection_info());
    images
        .into_iter()
        .map(|image| ImageResponse::new(image, &base))
        .collect()
}

/// Buffer one file part, giving up as soon as it grows past `limit` bytes.
async fn read_file(
    field: &mut Field,
    filename: Option<&str>,
    limit: usize,
) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| invalid_multipart_error(&err))?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(file_too_large_error(filename.unwrap_or("image"), limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn discard(field: &mut Field) -> Result<(), Error> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|err| invalid_multipart_error(&err))?;
    }
    Ok(())
}

/// Collect every `files` part of a multipart body. Other parts are drained
/// without being buffered.
async fn collect_uploads(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Result<Vec<ImageUpload>, Error> {
    let mut uploads = Vec::new();
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|err| invalid_multipart_error(&err))?;
        let disposition = field.content_disposition();
        let is_file = disposition.and_then(|cd| cd.get_name()) == Some(FILES_FIELD);
        let filename = disposition
            .and_then(|cd| cd.get_filename())
            .map(ToOwned::to_owned);
        let content_type = field.content_type().map(ToString::to_string);

        if !is_file {
            debug!(field = field.name(), "ignoring unexpected multipart field");
            discard(&mut field).await?;
            continue;
        }
        let bytes = read_file(&mut field, filename.as_deref(), max_file_bytes).await?;
        uploads.push(ImageUpload {
            filename,
            content_type,
            bytes,
        });
    }
    Ok(uploads)
}

/// List images of a project, newest first.
#[utoipa::path(
    get,
    path = "/projects/{id}/images",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Images, newest first", body = [ImageResponse]),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["images"],
    operation_id = "listImages"
)]
#[get("/projects/{id}/images")]
pub async fn list_images(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let images = state.annotations_query.list_images(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(respond_with(images, &req)))
}

/// Upload one or more images to a project.
///
/// Every part must declare an `image/*` content type; a single offending part
/// rejects the whole batch before anything is stored.
#[utoipa::path(
    post,
    path = "/projects/{id}/images",
    params(("id" = i32, Path, description = "Project id")),
    request_body(content_type = "multipart/form-data", description = "Repeated `files` parts"),
    responses(
        (status = 201, description = "Images stored", body = [ImageResponse]),
        (status = 400, description = "No files, a non-image part or a file over the size cap", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["images"],
    operation_id = "uploadImages"
)]
#[post("/projects/{id}/images")]
pub async fn upload_images(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    req: HttpRequest,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let project_id = path.into_inner();
    let uploads = collect_uploads(payload, state.max_upload_bytes).await?;
    let images = state.annotations.upload_images(project_id, uploads).await?;
    Ok(HttpResponse::Created().json(respond_with(images, &req)))
}

/// Delete an image with its annotations and stored file.
#[utoipa::path(
    delete,
    path = "/images/{id}",
    params(("id" = i32, Path, description = "Image id")),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 404, description = "Image not found", body = ErrorSchema)
    ),
    tags = ["images"],
    operation_id = "deleteImage"
)]
#[delete("/images/{id}")]
pub async fn delete_image(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.annotations.delete_image(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
