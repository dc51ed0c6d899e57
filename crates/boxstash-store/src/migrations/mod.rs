//! Schema migrations
//!
//! Named DDL steps recorded in a `migrations` ledger table. A name is applied
//! at most once per database.

pub mod embedded;
pub mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::{apply_migrations, applied_migrations, MigrationReport};
