//! SQLite repository
//!
//! One module per entity holds its query templates, parameter mapping and
//! row mapping; [`SqliteRepository`] wires them onto `BoxRepository`.

mod provider;
mod sqlite_repo;
mod user;
mod vagrant_box;
mod version;

pub use sqlite_repo::SqliteRepository;

use rusqlite::Row;

/// Read a nullable TEXT column, `NULL` as empty
pub(crate) fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

/// Read a nullable INTEGER column, `NULL` as zero
pub(crate) fn int(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or_default())
}

/// Read a nullable BOOLEAN column, `NULL` as false
pub(crate) fn flag(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(row.get::<_, Option<bool>>(idx)?.unwrap_or_default())
}
