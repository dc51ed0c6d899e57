//! Error handling for boxstash-store
//!
//! Maps rusqlite failures onto the shared ExError facility.

use boxstash_core::errors::{ExError, ExErrorKind};
use rusqlite::ErrorCode;

pub use boxstash_core::errors::Result;

/// Create a database error from rusqlite::Error
///
/// The driver message is kept verbatim; only the kind is classified. The
/// operation is left unset for the calling service to fill in.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::QueryReturnedNoRows => ExErrorKind::NotFound,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ExErrorKind::ConstraintViolation
        }
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => ExErrorKind::Serialization,
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind).with_message(err.to_string())
}

/// Create a migration error
pub fn migration_error(migration: &str, source: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration, source.message()))
        .with_source(source)
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("store_config")
        .with_message(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_maps_to_not_found() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_unique_violation_maps_to_constraint() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .map_err(from_rusqlite)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
        assert!(err.message().contains("UNIQUE"));
        assert_eq!(err.op(), None);
    }

    #[test]
    fn test_migration_error_keeps_source() {
        let inner = ExError::new(ExErrorKind::Persistence).with_message("near \"TABLEX\"");
        let err = migration_error("create-table-user", inner);
        assert!(err.message().contains("create-table-user"));
        assert!(err.source_error().is_some());
    }
}
