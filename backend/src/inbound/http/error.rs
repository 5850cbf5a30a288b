//! Rendering of domain errors as Depot's JSON error envelope.
//!
//! Every failed request is logged once here, at a level that follows the
//! error code, before the envelope is written. Internal failures keep their
//! real message in the log and reach clients as a generic message.

use std::borrow::Cow;

use actix_web::http::header::{CacheControl, CacheDirective, RETRY_AFTER};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error, info, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every Depot handler.
pub type ApiResult<T> = Result<T, Error>;

/// Seconds a client should wait before retrying after a 503.
pub const RETRY_AFTER_SECS: u32 = 5;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_failure(error: &Error) {
    let trace_id = error.trace_id().unwrap_or("-");
    let message = error.message();
    match error.code() {
        ErrorCode::InternalError => {
            error!(trace_id, message, details = ?error.details(), "request failed");
        }
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id, message, "backing service unavailable");
        }
        ErrorCode::Conflict => info!(trace_id, message, "request conflicts with stored state"),
        ErrorCode::InvalidRequest | ErrorCode::NotFound => {
            debug!(trace_id, code = ?error.code(), message, "request rejected");
        }
    }
}

/// What the client is allowed to see of `error`.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(CacheControl(vec![CacheDirective::NoStore]));
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id));
        }
        if self.code() == ErrorCode::ServiceUnavailable {
            builder.insert_header((RETRY_AFTER, RETRY_AFTER_SECS));
        }
        builder.json(client_view(self).as_ref())
    }
}
