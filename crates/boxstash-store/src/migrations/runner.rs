//! Migration runner
//!
//! Applies pending migrations in order, each one together with its ledger
//! row inside a single transaction.

use crate::binder::Params;
use crate::db::{Database, Writer};
use crate::errors::{migration_error, Result};
use crate::migrations::embedded::get_migrations;

const CREATE_LEDGER: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);";

/// Names applied by one [`apply_migrations`] run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Apply all pending migrations to the database
///
/// # Errors
///
/// `Persistence` naming the first migration that failed. Migrations before
/// it stay applied; the failed one leaves no trace.
pub fn apply_migrations(db: &Database) -> Result<MigrationReport> {
    db.write_once(|w| w.execute_batch(CREATE_LEDGER))?;

    let mut report = MigrationReport::default();
    for migration in get_migrations() {
        let applied = db
            .transact(|w| {
                if is_applied(w, migration.name)? {
                    return Ok(false);
                }
                w.execute_batch(migration.sql)?;
                w.execute(
                    "INSERT INTO migrations (name) VALUES (:name)",
                    &Params::new().with("name", migration.name.to_string()),
                )?;
                Ok(true)
            })
            .map_err(|e| migration_error(migration.name, e))?;

        if applied {
            tracing::debug!(migration = migration.name, "migration applied");
            report.applied.push(migration.name);
        }
    }
    Ok(report)
}

fn is_applied(w: &Writer<'_>, name: &str) -> Result<bool> {
    let found = w.query_opt(
        "SELECT 1 FROM migrations WHERE name = :name",
        &Params::new().with("name", name.to_string()),
        |_| Ok(()),
    )?;
    Ok(found.is_some())
}

/// Ledger contents in application order
///
/// # Errors
///
/// `Persistence` when the ledger cannot be read.
pub fn applied_migrations(db: &Database) -> Result<Vec<String>> {
    db.view(|r| {
        r.query_all(
            "SELECT name FROM migrations ORDER BY id",
            &Params::new(),
            |row| row.get(0),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_migrations() {
        let db = Database::open_in_memory().unwrap();
        let names = applied_migrations(&db).unwrap();
        assert_eq!(
            names,
            vec![
                "create-table-user",
                "create-table-box",
                "create-table-version",
                "create-table-provider"
            ]
        );
    }

    #[test]
    fn test_idempotency() {
        let db = Database::open_in_memory().unwrap();
        let report = apply_migrations(&db).unwrap();
        assert!(report.is_noop());
        assert_eq!(applied_migrations(&db).unwrap().len(), 4);
    }
}
