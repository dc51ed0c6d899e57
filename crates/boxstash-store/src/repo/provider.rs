use boxstash_core::errors::{no_rows_updated, not_found, Result};
use boxstash_core::time::Clock;
use boxstash_core::{Provider, Timestamped};
use boxstash_core_types::Sensitive;
use rusqlite::Row;

use super::{flag, int, text};
use crate::binder::{Params, ToParams};
use crate::db::Database;

const COLUMNS: &str = "id, name, hosted, hosted_token, original_url, created_at, updated_at,
     download_url, version_id";

const INSERT: &str = "INSERT INTO provider (name, hosted, hosted_token, original_url,
        created_at, updated_at, download_url, version_id)
     VALUES (:name, :hosted, :hosted_token, :original_url, :created_at, :updated_at,
        :download_url, :version_id)";

const UPDATE: &str = "UPDATE provider SET
        name = :name,
        hosted = :hosted,
        hosted_token = :hosted_token,
        original_url = :original_url,
        updated_at = :updated_at,
        download_url = :download_url
     WHERE id = :id";

impl ToParams for Provider {
    fn to_params(&self) -> Params {
        Params::new()
            .with("id", self.id)
            .with("name", self.name.clone())
            .with("hosted", self.hosted)
            .with("hosted_token", self.hosted_token.clone())
            .with("original_url", self.original_url.clone())
            .with("created_at", self.created_at)
            .with("updated_at", self.updated_at)
            .with("download_url", self.download_url.clone())
            .with("version_id", self.version_id)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Provider> {
    Ok(Provider {
        id: row.get(0)?,
        name: row.get(1)?,
        hosted: flag(row, 2)?,
        hosted_token: text(row, 3)?,
        original_url: text(row, 4)?,
        created_at: int(row, 5)?,
        updated_at: int(row, 6)?,
        download_url: text(row, 7)?,
        version_id: row.get(8)?,
    })
}

fn select(filter: &str) -> String {
    format!("SELECT {} FROM provider WHERE {} ORDER BY id", COLUMNS, filter)
}

pub(crate) fn create(db: &Database, clock: &dyn Clock, provider: &Provider) -> Result<Provider> {
    let mut stored = provider.clone();
    stored.stamp_created(clock.now());
    stored.id = db.write_once(|w| w.insert(INSERT, &stored.to_params()))?;
    tracing::debug!(
        provider = %stored.name,
        version_id = stored.version_id,
        hosted_token = ?Sensitive::new(&stored.hosted_token),
        id = stored.id,
        "provider inserted"
    );
    Ok(stored)
}

pub(crate) fn find_by_id(db: &Database, id: i64) -> Result<Provider> {
    db.view(|r| r.query_opt(&select("id = :id"), &Params::new().with("id", id), from_row))?
        .ok_or_else(|| not_found("provider", id))
}

pub(crate) fn find_by_version_id(db: &Database, version_id: i64, name: &str) -> Result<Provider> {
    let params = Params::new()
        .with("version_id", version_id)
        .with("name", name.to_string());
    db.view(|r| r.query_opt(&select("version_id = :version_id AND name = :name"), &params, from_row))?
        .ok_or_else(|| not_found("provider", format!("{}@{}", name, version_id)))
}

pub(crate) fn list(db: &Database, version_id: i64) -> Result<Vec<Provider>> {
    let params = Params::new().with("version_id", version_id);
    db.view(|r| r.query_all(&select("version_id = :version_id"), &params, from_row))
}

pub(crate) fn update(db: &Database, clock: &dyn Clock, provider: &Provider) -> Result<Provider> {
    let mut stored = provider.clone();
    stored.stamp_updated(clock.now());
    let rows = db.write_once(|w| w.execute(UPDATE, &stored.to_params()))?;
    if rows == 0 {
        return Err(no_rows_updated("provider", provider.id));
    }
    Ok(stored)
}

pub(crate) fn delete(db: &Database, id: i64) -> Result<Provider> {
    db.transact(|w| {
        let params = Params::new().with("id", id);
        let provider = w
            .query_opt(&select("id = :id"), &params, from_row)?
            .ok_or_else(|| not_found("provider", id))?;
        w.execute("DELETE FROM provider WHERE id = :id", &params)?;
        Ok(provider)
    })
}
