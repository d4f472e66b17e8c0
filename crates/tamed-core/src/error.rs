//! Error types module
//!
//! All service-level failures are unified under [`AppError`]. Backend crates keep their
//! own error enums (`StorageError`, detection errors) and convert into `AppError` at the
//! service boundary.
//!
//! The `From<sqlx::Error>` conversion is gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Prefix the error message with a context label, keeping the variant.
    ///
    /// `AppError::NotFound("x")` with context `srv.view.art` reads
    /// `Not found: srv.view.art: x`.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            AppError::Database(msg) => AppError::Database(format!("{}: {}", ctx, msg)),
            AppError::Storage(msg) => AppError::Storage(format!("{}: {}", ctx, msg)),
            AppError::InvalidInput(msg) => AppError::InvalidInput(format!("{}: {}", ctx, msg)),
            AppError::BadRequest(msg) => AppError::BadRequest(format!("{}: {}", ctx, msg)),
            AppError::NotFound(msg) => AppError::NotFound(format!("{}: {}", ctx, msg)),
            AppError::Conflict(msg) => AppError::Conflict(format!("{}: {}", ctx, msg)),
            AppError::Internal(msg) => AppError::Internal(format!("{}: {}", ctx, msg)),
            AppError::InternalWithSource { message, source } => AppError::InternalWithSource {
                message: format!("{}: {}", ctx, message),
                source,
            },
        }
    }

    /// Whether this error reports a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(db_err.message().to_string());
            }
        }
        AppError::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_error_is_database() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_context_keeps_variant() {
        let err = AppError::NotFound("User 'bob' not found!".to_string()).context("srv.view.user");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Not found: srv.view.user: User 'bob' not found!"
        );

        let err = AppError::Storage("disk full".to_string()).context("postsrv.create(a.jpg)");
        assert!(matches!(err, AppError::Storage(_)));
        assert!(err.to_string().contains("postsrv.create(a.jpg): disk full"));
    }

    #[test]
    fn test_io_error_is_internal() {
        let err = AppError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(err, AppError::Internal(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_json_error_is_invalid_input() {
        let err = AppError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
