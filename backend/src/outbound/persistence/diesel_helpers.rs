//! Shared helpers and macros for Diesel repository implementations.
//!
//! Each repository port has its own error enum, so the mappers are grouped
//! into one submodule per port. The query macros take the submodule name and
//! pull `map_pool_error` and `map_diesel_error` from it.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }
}

/// Error mappers for the logistics repository.
pub mod logistics {
    use super::*;
    use crate::domain::ports::LogisticsRepositoryError;

    /// Map pool errors to logistics repository errors.
    pub fn map_pool_error(error: PoolError) -> LogisticsRepositoryError {
        LogisticsRepositoryError::connection(map_pool_error_message(error))
    }

    /// Map Diesel errors to logistics repository errors.
    pub fn map_diesel_error(error: DieselError) -> LogisticsRepositoryError {
        log_diesel_error(&error);
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                LogisticsRepositoryError::connection("database connection error")
            }
            DieselError::QueryBuilderError(_) => {
                LogisticsRepositoryError::query("database query error")
            }
            _ => LogisticsRepositoryError::query("database error"),
        }
    }
}

/// Error mappers for the annotation repository.
pub mod annotations {
    use super::*;
    use crate::domain::ports::AnnotationRepositoryError;

    /// Constraint raised when an image references a missing project.
    pub const IMAGE_PROJECT_FKEY: &str = "images_project_id_fkey";
    /// Constraint raised when an annotation references a missing image.
    pub const ANNOTATION_IMAGE_FKEY: &str = "annotations_image_id_fkey";
    /// Unique constraint on stored file names.
    pub const IMAGE_STORAGE_NAME_KEY: &str = "images_storage_name_key";

    /// Map pool errors to annotation repository errors.
    pub fn map_pool_error(error: PoolError) -> AnnotationRepositoryError {
        AnnotationRepositoryError::connection(map_pool_error_message(error))
    }

    /// Translate a foreign key violation into the missing parent it names.
    ///
    /// Unrecognised constraints are logged so new foreign keys get a mapping.
    fn map_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> AnnotationRepositoryError {
        match constraint_name {
            Some(IMAGE_PROJECT_FKEY) => AnnotationRepositoryError::missing_parent("Project not found"),
            Some(ANNOTATION_IMAGE_FKEY) => {
                AnnotationRepositoryError::missing_parent("Image not found")
            }
            _ => {
                warn!(
                    message,
                    constraint_name = ?constraint_name,
                    "unrecognised foreign key violation - may need specific error mapping"
                );
                AnnotationRepositoryError::query("foreign key violation")
            }
        }
    }

    fn map_unique_violation(constraint_name: Option<&str>) -> AnnotationRepositoryError {
        match constraint_name {
            Some(IMAGE_STORAGE_NAME_KEY) => {
                AnnotationRepositoryError::duplicate("storage name is already recorded")
            }
            other => AnnotationRepositoryError::duplicate(format!(
                "unique constraint {} violated",
                other.unwrap_or("<unknown>")
            )),
        }
    }

    /// Map Diesel errors to annotation repository errors.
    pub fn map_diesel_error(error: DieselError) -> AnnotationRepositoryError {
        log_diesel_error(&error);
        match error {
            DieselError::NotFound => AnnotationRepositoryError::query("record not found"),
            DieselError::QueryBuilderError(_) => {
                AnnotationRepositoryError::query("database query error")
            }
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::ForeignKeyViolation => {
                    map_foreign_key_violation(info.message(), info.constraint_name())
                }
                DatabaseErrorKind::UniqueViolation => {
                    map_unique_violation(info.constraint_name())
                }
                DatabaseErrorKind::ClosedConnection => {
                    AnnotationRepositoryError::connection("database connection error")
                }
                _ => AnnotationRepositoryError::query("database error"),
            },
            _ => AnnotationRepositoryError::query("database error"),
        }
    }
}

/// Macro for query methods that return `Option<T>`.
///
/// Reduces boilerplate: acquire connection, execute query, map errors, convert row.
#[macro_export]
macro_rules! query_optional {
    (
        $self:ident,
        $errors:ident,
        $table:expr,
        $filter:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::$errors::{
            map_diesel_error, map_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map($converter))
    }};
}

/// Macro for query methods that return `Vec<T>`.
///
/// Reduces boilerplate: acquire connection, execute query with ordering, map
/// errors, convert rows.
#[macro_export]
macro_rules! query_vec {
    (
        $self:ident,
        $errors:ident,
        $table:expr,
        $filter:expr,
        $order_by:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::$errors::{
            map_diesel_error, map_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .order_by($order_by)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map($converter).collect())
    }};
}

/// Macro for unfiltered query methods that return `Vec<T>`.
#[macro_export]
macro_rules! query_all {
    (
        $self:ident,
        $errors:ident,
        $table:expr,
        $order_by:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::$errors::{
            map_diesel_error, map_pool_error,
        };

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<$row_type> = $table
            .select(<$row_type>::as_select())
            .order_by($order_by)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map($converter).collect())
    }};
}
