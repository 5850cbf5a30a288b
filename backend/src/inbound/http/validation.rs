//! Request validation helpers shared by the HTTP handlers.
//!
//! Extractor failures (malformed JSON, non-numeric path ids, broken multipart
//! bodies) are turned into `invalid_request` errors so every 400 uses the same
//! JSON envelope as domain validation failures.

use actix_multipart::MultipartError;
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidPath,
    InvalidMultipart,
    FileTooLarge,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::InvalidMultipart => "invalid_multipart",
            ErrorCode::FileTooLarge => "file_too_large",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn validation_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Map a JSON body extraction failure.
pub(crate) fn invalid_body_error(err: &JsonPayloadError) -> Error {
    validation_error(
        FieldName::new("body"),
        ErrorCode::InvalidBody,
        format!("invalid JSON body: {err}"),
    )
}

/// Map a path segment extraction failure, such as a non-numeric id.
pub(crate) fn invalid_path_error(err: &PathError) -> Error {
    validation_error(
        FieldName::new("id"),
        ErrorCode::InvalidPath,
        format!("invalid path parameter: {err}"),
    )
}

/// Map a failure while reading a multipart upload.
pub(crate) fn invalid_multipart_error(err: &MultipartError) -> Error {
    validation_error(
        FieldName::new("files"),
        ErrorCode::InvalidMultipart,
        format!("malformed multipart payload: {err}"),
    )
}

/// Report an uploaded file that exceeds the per-file cap.
pub(crate) fn file_too_large_error(filename: &str, limit: usize) -> Error {
    validation_error(
        FieldName::new("files"),
        ErrorCode::FileTooLarge,
        format!("File too large: {filename} exceeds {limit} bytes"),
    )
}

/// JSON extractor configuration reporting errors in the API envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| invalid_body_error(&err).into())
}

/// Path extractor configuration reporting errors in the API envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req: &HttpRequest| invalid_path_error(&err).into())
}
