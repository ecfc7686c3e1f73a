//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use copion_domain::CopionError;
use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use serde_json::Error as JsonError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CopionError);

impl From<InfraError> for CopionError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CopionError> for InfraError {
    fn from(value: CopionError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCopionError {
    fn into_copion(self) -> CopionError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CopionError */
/* -------------------------------------------------------------------------- */

impl IntoCopionError for SqlError {
    fn into_copion(self) -> CopionError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => CopionError::Database("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        CopionError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        CopionError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        CopionError::Database("foreign key constraint violation".into())
                    }
                    (ErrorCode::NotADatabase, _) => {
                        CopionError::Database("file is not a sqlite database".into())
                    }
                    _ => CopionError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CopionError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CopionError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::IntegralValueOutOfRange(column, value) => {
                CopionError::Database(format!("value {value} out of range in column {column}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CopionError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => CopionError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => CopionError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_copion())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CopionError */
/* -------------------------------------------------------------------------- */

impl IntoCopionError for PoolError {
    fn into_copion(self) -> CopionError {
        CopionError::Database(format!("connection pool unavailable: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_copion())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → CopionError */
/* -------------------------------------------------------------------------- */

impl IntoCopionError for IoError {
    fn into_copion(self) -> CopionError {
        match self.kind() {
            ErrorKind::NotFound => CopionError::Io(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => CopionError::Io(format!("permission denied: {self}")),
            _ => CopionError::Io(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_copion())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → CopionError */
/* -------------------------------------------------------------------------- */

impl IntoCopionError for JsonError {
    fn into_copion(self) -> CopionError {
        if self.is_io() {
            CopionError::Io(self.to_string())
        } else {
            CopionError::Internal(format!("snapshot encoding failed: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_copion())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → CopionError */
/* -------------------------------------------------------------------------- */

impl IntoCopionError for JoinError {
    fn into_copion(self) -> CopionError {
        if self.is_cancelled() {
            CopionError::Internal("blocking task was cancelled".into())
        } else {
            CopionError::Internal(format!("blocking task panicked: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_copion())
    }
}

/// Shorthand for `map_err` call sites.
pub fn to_domain<E>(err: E) -> CopionError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
