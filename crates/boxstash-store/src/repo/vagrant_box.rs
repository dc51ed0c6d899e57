use boxstash_core::errors::{no_rows_updated, not_found, Result};
use boxstash_core::time::Clock;
use boxstash_core::{Timestamped, VagrantBox};
use rusqlite::Row;

use super::{flag, int, text};
use crate::binder::{Params, ToParams};
use crate::db::Database;

const COLUMNS: &str = "id, name, user_id, username, is_private, created_at, updated_at,
     short_description, description, description_html, description_markdown, tag, downloads";

const INSERT: &str = "INSERT INTO box (name, user_id, username, is_private, created_at,
        updated_at, short_description, description, description_html, description_markdown,
        tag, downloads)
     VALUES (:name, :user_id, :username, :is_private, :created_at, :updated_at,
        :short_description, :description, :description_html, :description_markdown,
        :tag, :downloads)";

const UPDATE: &str = "UPDATE box SET
        name = :name,
        is_private = :is_private,
        updated_at = :updated_at,
        short_description = :short_description,
        description = :description,
        description_html = :description_html,
        description_markdown = :description_markdown,
        tag = :tag,
        downloads = :downloads
     WHERE id = :id";

impl ToParams for VagrantBox {
    fn to_params(&self) -> Params {
        Params::new()
            .with("id", self.id)
            .with("name", self.name.clone())
            .with("user_id", self.user_id)
            .with("username", self.username.clone())
            .with("is_private", self.is_private)
            .with("created_at", self.created_at)
            .with("updated_at", self.updated_at)
            .with("short_description", self.short_description.clone())
            .with("description", self.description.clone())
            .with("description_html", self.description_html.clone())
            .with("description_markdown", self.description_markdown.clone())
            .with("tag", self.tag.clone())
            .with("downloads", self.downloads)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<VagrantBox> {
    Ok(VagrantBox {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
        username: row.get(3)?,
        is_private: flag(row, 4)?,
        created_at: int(row, 5)?,
        updated_at: int(row, 6)?,
        short_description: text(row, 7)?,
        description: text(row, 8)?,
        description_html: text(row, 9)?,
        description_markdown: text(row, 10)?,
        tag: text(row, 11)?,
        downloads: int(row, 12)?,
        current_version: None,
        versions: Vec::new(),
    })
}

fn select(filter: &str) -> String {
    format!("SELECT {} FROM box WHERE {} ORDER BY id", COLUMNS, filter)
}

pub(crate) fn create(db: &Database, clock: &dyn Clock, vbox: &VagrantBox) -> Result<VagrantBox> {
    let mut stored = vbox.clone();
    stored.stamp_created(clock.now());
    stored.id = db.write_once(|w| w.insert(INSERT, &stored.to_params()))?;
    tracing::debug!(slug = %stored.slug(), id = stored.id, "box inserted");
    Ok(stored)
}

pub(crate) fn find_by_id(db: &Database, id: i64) -> Result<VagrantBox> {
    db.view(|r| r.query_opt(&select("id = :id"), &Params::new().with("id", id), from_row))?
        .ok_or_else(|| not_found("box", id))
}

pub(crate) fn find_by_username(db: &Database, username: &str, name: &str) -> Result<VagrantBox> {
    let params = Params::new()
        .with("username", username.to_string())
        .with("name", name.to_string());
    db.view(|r| r.query_opt(&select("username = :username AND name = :name"), &params, from_row))?
        .ok_or_else(|| not_found("box", format!("{}/{}", username, name)))
}

pub(crate) fn list(db: &Database, username: &str) -> Result<Vec<VagrantBox>> {
    let params = Params::new().with("username", username.to_string());
    db.view(|r| r.query_all(&select("username = :username"), &params, from_row))
}

pub(crate) fn update(db: &Database, clock: &dyn Clock, vbox: &VagrantBox) -> Result<VagrantBox> {
    let mut stored = vbox.clone();
    stored.stamp_updated(clock.now());
    let rows = db.write_once(|w| w.execute(UPDATE, &stored.to_params()))?;
    if rows == 0 {
        return Err(no_rows_updated("box", vbox.id));
    }
    Ok(stored)
}

pub(crate) fn delete(db: &Database, id: i64) -> Result<VagrantBox> {
    db.transact(|w| {
        let params = Params::new().with("id", id);
        let vbox = w
            .query_opt(&select("id = :id"), &params, from_row)?
            .ok_or_else(|| not_found("box", id))?;
        w.execute("DELETE FROM box WHERE id = :id", &params)?;
        Ok(vbox)
    })
}
