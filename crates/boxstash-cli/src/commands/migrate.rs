//! Schema migration command
//!
//! Usage: boxstash migrate

use boxstash_store::{Database, StoreConfig};
use serde_json::json;

use super::print_json;
use crate::error::CliError;

/// Open the database, apply pending migrations and report what ran
pub fn execute(config: &StoreConfig) -> Result<(), CliError> {
    // Opening applies every pending migration.
    let db = Database::open(config)?;
    let ledger = boxstash_store::migrations::applied_migrations(&db)?;
    print_json(&json!({ "applied": ledger }))
}
