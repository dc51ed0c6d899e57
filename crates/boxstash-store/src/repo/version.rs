use boxstash_core::errors::{no_rows_updated, not_found, Result};
use boxstash_core::time::Clock;
use boxstash_core::{Timestamped, Version, VersionStatus};
use rusqlite::types::Type;
use rusqlite::Row;

use super::{int, text};
use crate::binder::{Params, ToParams};
use crate::db::Database;

const COLUMNS: &str = "id, version, status, created_at, updated_at, description,
     description_html, description_markdown, number, release_url, revoke_url, box_id";

const INSERT: &str = "INSERT INTO version (version, status, created_at, updated_at,
        description, description_html, description_markdown, number, release_url,
        revoke_url, box_id)
     VALUES (:version, :status, :created_at, :updated_at, :description, :description_html,
        :description_markdown, :number, :release_url, :revoke_url, :box_id)";

const UPDATE: &str = "UPDATE version SET
        version = :version,
        status = :status,
        updated_at = :updated_at,
        description = :description,
        description_html = :description_html,
        description_markdown = :description_markdown,
        number = :number,
        release_url = :release_url,
        revoke_url = :revoke_url
     WHERE id = :id";

impl ToParams for Version {
    fn to_params(&self) -> Params {
        Params::new()
            .with("id", self.id)
            .with("version", self.version.clone())
            .with("status", self.status.as_str().to_string())
            .with("created_at", self.created_at)
            .with("updated_at", self.updated_at)
            .with("description", self.description.clone())
            .with("description_html", self.description_html.clone())
            .with("description_markdown", self.description_markdown.clone())
            .with("number", self.number.clone())
            .with("release_url", self.release_url.clone())
            .with("revoke_url", self.revoke_url.clone())
            .with("box_id", self.box_id)
    }
}

fn status(row: &Row<'_>, idx: usize) -> rusqlite::Result<VersionStatus> {
    match row.get::<_, Option<String>>(idx)? {
        None => Ok(VersionStatus::default()),
        Some(raw) if raw.is_empty() => Ok(VersionStatus::default()),
        Some(raw) => raw
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Version> {
    Ok(Version {
        id: row.get(0)?,
        version: row.get(1)?,
        status: status(row, 2)?,
        created_at: int(row, 3)?,
        updated_at: int(row, 4)?,
        description: text(row, 5)?,
        description_html: text(row, 6)?,
        description_markdown: text(row, 7)?,
        number: text(row, 8)?,
        release_url: text(row, 9)?,
        revoke_url: text(row, 10)?,
        box_id: row.get(11)?,
        providers: Vec::new(),
    })
}

fn select(filter: &str) -> String {
    format!("SELECT {} FROM version WHERE {} ORDER BY id", COLUMNS, filter)
}

pub(crate) fn create(db: &Database, clock: &dyn Clock, version: &Version) -> Result<Version> {
    let mut stored = version.clone();
    stored.stamp_created(clock.now());
    stored.id = db.write_once(|w| w.insert(INSERT, &stored.to_params()))?;
    tracing::debug!(version = %stored.version, box_id = stored.box_id, id = stored.id, "version inserted");
    Ok(stored)
}

pub(crate) fn find_by_id(db: &Database, id: i64) -> Result<Version> {
    db.view(|r| r.query_opt(&select("id = :id"), &Params::new().with("id", id), from_row))?
        .ok_or_else(|| not_found("version", id))
}

pub(crate) fn find_by_box_id(db: &Database, box_id: i64, version: &str) -> Result<Version> {
    let params = Params::new()
        .with("box_id", box_id)
        .with("version", version.to_string());
    db.view(|r| r.query_opt(&select("box_id = :box_id AND version = :version"), &params, from_row))?
        .ok_or_else(|| not_found("version", format!("{}@{}", version, box_id)))
}

pub(crate) fn list(db: &Database, box_id: i64) -> Result<Vec<Version>> {
    let params = Params::new().with("box_id", box_id);
    db.view(|r| r.query_all(&select("box_id = :box_id"), &params, from_row))
}

pub(crate) fn update(db: &Database, clock: &dyn Clock, version: &Version) -> Result<Version> {
    let mut stored = version.clone();
    stored.stamp_updated(clock.now());
    let rows = db.write_once(|w| w.execute(UPDATE, &stored.to_params()))?;
    if rows == 0 {
        return Err(no_rows_updated("version", version.id));
    }
    Ok(stored)
}

pub(crate) fn delete(db: &Database, id: i64) -> Result<Version> {
    db.transact(|w| {
        let params = Params::new().with("id", id);
        let version = w
            .query_opt(&select("id = :id"), &params, from_row)?
            .ok_or_else(|| not_found("version", id))?;
        w.execute("DELETE FROM version WHERE id = :id", &params)?;
        Ok(version)
    })
}
