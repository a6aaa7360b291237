use shared_types::AppError;
use sqlx::error::ErrorKind;
use std::collections::HashMap;

/// Convert a sqlx::Error into an AppError.
///
/// Constraint violations (unique, foreign key, NOT NULL, CHECK) are the
/// storage boundary rejecting an invalid record and map onto the
/// validation/conflict kinds; everything else is a database error.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => AppError::conflict(db_err.message().to_string()),
            ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                AppError::validation(db_err.message().to_string(), HashMap::new())
            }
            _ => AppError::database(err.to_string()),
        },
        _ => AppError::database(err.to_string()),
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}
