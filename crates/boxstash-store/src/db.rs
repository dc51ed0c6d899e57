//! Database connection guard
//!
//! One writer connection and a small pool of read-only connections behind a
//! shared/exclusive gate. Views run concurrently with each other; single
//! writes and transactions run alone.
//!
//! Lock order is always gate first, then connection mutex.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use rusqlite::{params_from_iter, Connection, OpenFlags, OptionalExtension, Row, TransactionBehavior};

use crate::binder::{bind_named, BoundQuery, Params};
use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::{apply_migrations, MigrationReport};

/// Shared handle to the metadata database
pub struct Database {
    gate: RwLock<()>,
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
}

/// Read-only access handed to [`Database::view`]
pub struct Reader<'c> {
    conn: &'c Connection,
}

/// Write access handed to [`Database::write_once`] and [`Database::transact`]
pub struct Writer<'c> {
    conn: &'c Connection,
}

fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(PoisonError::into_inner)
}

fn configure_writer(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.busy_timeout(config.busy_timeout())
        .map_err(from_rusqlite)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;
    if !config.is_in_memory() {
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::debug!(journal_mode = %mode, "writer connection configured");
    }
    Ok(())
}

fn open_reader(config: &StoreConfig) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(&config.path, flags).map_err(from_rusqlite)?;
    conn.busy_timeout(config.busy_timeout())
        .map_err(from_rusqlite)?;
    conn.execute_batch("PRAGMA query_only = ON;")
        .map_err(from_rusqlite)?;
    Ok(conn)
}

impl Database {
    /// Open (creating if needed) and migrate the database named by `config`
    ///
    /// # Errors
    ///
    /// `Config` for an unusable path, `Persistence` when the file cannot be
    /// opened or a migration fails.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let writer = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(from_rusqlite)?;
        configure_writer(&writer, config)?;

        let mut db = Self {
            gate: RwLock::new(()),
            writer: Mutex::new(writer),
            readers: Vec::new(),
            next_reader: AtomicUsize::new(0),
        };
        let report = db.migrate()?;
        tracing::debug!(
            path = %config.path.display(),
            applied = report.applied.len(),
            "database opened"
        );

        if !config.is_in_memory() {
            for _ in 0..config.readers {
                db.readers.push(Mutex::new(open_reader(config)?));
            }
        }
        Ok(db)
    }

    /// Private in-memory database, migrated
    ///
    /// # Errors
    ///
    /// `Persistence` when a migration fails.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Apply pending schema migrations
    ///
    /// # Errors
    ///
    /// `Persistence` naming the failed migration.
    pub fn migrate(&self) -> Result<MigrationReport> {
        apply_migrations(self)
    }

    /// Number of read-only connections serving views
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Run `f` under shared access
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn view<T>(&self, f: impl FnOnce(&Reader<'_>) -> Result<T>) -> Result<T> {
        let _shared = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        if self.readers.is_empty() {
            let conn = lock(&self.writer);
            return f(&Reader { conn: &conn });
        }
        let slot = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = lock(&self.readers[slot]);
        f(&Reader { conn: &conn })
    }

    /// Run `f` under exclusive access without a transaction
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn write_once<T>(&self, f: impl FnOnce(&Writer<'_>) -> Result<T>) -> Result<T> {
        let _exclusive = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let conn = lock(&self.writer);
        f(&Writer { conn: &conn })
    }

    /// Run `f` under exclusive access inside a transaction
    ///
    /// Commits when `f` returns `Ok`. Rolls back when it returns `Err`, and
    /// when it panics, in which case the panic is resumed after rollback.
    ///
    /// # Errors
    ///
    /// The error `f` returned, or a failure to begin or commit.
    pub fn transact<T>(&self, f: impl FnOnce(&Writer<'_>) -> Result<T>) -> Result<T> {
        let _exclusive = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let mut conn = lock(&self.writer);
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(&Writer { conn: &tx })));
        match outcome {
            Ok(Ok(value)) => {
                tx.commit().map_err(from_rusqlite)?;
                Ok(value)
            }
            Ok(Err(err)) => {
                if let Err(rb) = tx.rollback() {
                    tracing::warn!(error = %rb, "rollback failed");
                }
                Err(err)
            }
            Err(payload) => {
                if let Err(rb) = tx.rollback() {
                    tracing::warn!(error = %rb, "rollback after panic failed");
                }
                tracing::error!("transaction body panicked; rolled back");
                panic::resume_unwind(payload)
            }
        }
    }
}

fn query_opt<T>(
    conn: &Connection,
    template: &str,
    params: &Params,
    map: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>> {
    let BoundQuery { sql, args } = bind_named(template, params)?;
    tracing::debug!(sql = %sql, args = args.len(), "query_opt");
    conn.query_row(&sql, params_from_iter(args.iter()), map)
        .optional()
        .map_err(from_rusqlite)
}

fn query_all<T>(
    conn: &Connection,
    template: &str,
    params: &Params,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let BoundQuery { sql, args } = bind_named(template, params)?;
    tracing::debug!(sql = %sql, args = args.len(), "query_all");
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), map)
        .map_err(from_rusqlite)?;
    rows.collect::<rusqlite::Result<Vec<T>>>()
        .map_err(from_rusqlite)
}

impl Reader<'_> {
    /// First row of a named-parameter query, `None` when nothing matched
    ///
    /// # Errors
    ///
    /// `InvalidData` for an unbound placeholder, `Persistence` on driver failure.
    pub fn query_opt<T>(
        &self,
        template: &str,
        params: &Params,
        map: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        query_opt(self.conn, template, params, map)
    }

    /// Every row of a named-parameter query
    ///
    /// # Errors
    ///
    /// `InvalidData` for an unbound placeholder, `Persistence` on driver failure.
    pub fn query_all<T>(
        &self,
        template: &str,
        params: &Params,
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        query_all(self.conn, template, params, map)
    }
}

impl Writer<'_> {
    /// See [`Reader::query_opt`]
    ///
    /// # Errors
    ///
    /// `InvalidData` for an unbound placeholder, `Persistence` on driver failure.
    pub fn query_opt<T>(
        &self,
        template: &str,
        params: &Params,
        map: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        query_opt(self.conn, template, params, map)
    }

    /// See [`Reader::query_all`]
    ///
    /// # Errors
    ///
    /// `InvalidData` for an unbound placeholder, `Persistence` on driver failure.
    pub fn query_all<T>(
        &self,
        template: &str,
        params: &Params,
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        query_all(self.conn, template, params, map)
    }

    /// Execute a named-parameter statement, returning rows affected
    ///
    /// # Errors
    ///
    /// `InvalidData` for an unbound placeholder, `ConstraintViolation` or
    /// `Persistence` on driver failure.
    pub fn execute(&self, template: &str, params: &Params) -> Result<usize> {
        let BoundQuery { sql, args } = bind_named(template, params)?;
        tracing::debug!(sql = %sql, args = args.len(), "execute");
        self.conn
            .execute(&sql, params_from_iter(args.iter()))
            .map_err(from_rusqlite)
    }

    /// Execute an INSERT, returning the new row id
    ///
    /// # Errors
    ///
    /// Same as [`Writer::execute`].
    pub fn insert(&self, template: &str, params: &Params) -> Result<i64> {
        self.execute(template, params)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Run raw SQL with no parameters
    ///
    /// # Errors
    ///
    /// `Persistence` on driver failure.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql).map_err(from_rusqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxstash_core::ExErrorKind;

    fn scratch() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.write_once(|w| w.execute_batch("CREATE TABLE scratch (n INTEGER NOT NULL);"))
            .unwrap();
        db
    }

    fn count(db: &Database) -> i64 {
        db.view(|r| {
            r.query_opt("SELECT COUNT(*) FROM scratch", &Params::new(), |row| row.get(0))
        })
        .unwrap()
        .unwrap_or(0)
    }

    #[test]
    fn test_transact_commits_on_ok() {
        let db = scratch();
        db.transact(|w| {
            w.execute("INSERT INTO scratch (n) VALUES (:n)", &Params::new().with("n", 1i64))?;
            w.execute("INSERT INTO scratch (n) VALUES (:n)", &Params::new().with("n", 2i64))
        })
        .unwrap();
        assert_eq!(count(&db), 2);
    }

    #[test]
    fn test_transact_rolls_back_on_err() {
        let db = scratch();
        let err = db
            .transact(|w| {
                w.execute("INSERT INTO scratch (n) VALUES (1)", &Params::new())?;
                w.execute("INSERT INTO scratch (n) VALUES (NULL)", &Params::new())
            })
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
        assert_eq!(count(&db), 0);
    }

    #[test]
    fn test_insert_returns_row_id() {
        let db = scratch();
        let first = db
            .write_once(|w| w.insert("INSERT INTO scratch (n) VALUES (5)", &Params::new()))
            .unwrap();
        let second = db
            .write_once(|w| w.insert("INSERT INTO scratch (n) VALUES (6)", &Params::new()))
            .unwrap();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_query_opt_no_rows_is_none() {
        let db = scratch();
        let found: Option<i64> = db
            .view(|r| {
                r.query_opt(
                    "SELECT n FROM scratch WHERE n = :n",
                    &Params::new().with("n", 9i64),
                    |row| row.get(0),
                )
            })
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_in_memory_has_no_readers() {
        assert_eq!(scratch().reader_count(), 0);
    }
}
