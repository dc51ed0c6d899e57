use boxstash_core::errors::{no_rows_updated, not_found, Result};
use boxstash_core::User;
use rusqlite::Row;

use super::text;
use crate::binder::{Params, ToParams};
use crate::db::Database;

const COLUMNS: &str = "id, username, avatar_url, profile_html, profile_markdown";

const INSERT: &str = "INSERT INTO user (username, avatar_url, profile_html, profile_markdown)
     VALUES (:username, :avatar_url, :profile_html, :profile_markdown)";

const UPDATE: &str = "UPDATE user SET
        avatar_url = :avatar_url,
        profile_html = :profile_html,
        profile_markdown = :profile_markdown
     WHERE id = :id";

impl ToParams for User {
    fn to_params(&self) -> Params {
        Params::new()
            .with("id", self.id)
            .with("username", self.username.clone())
            .with("avatar_url", self.avatar_url.clone())
            .with("profile_html", self.profile_html.clone())
            .with("profile_markdown", self.profile_markdown.clone())
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        avatar_url: text(row, 2)?,
        profile_html: text(row, 3)?,
        profile_markdown: text(row, 4)?,
        boxes: Vec::new(),
    })
}

fn select(filter: &str) -> String {
    format!("SELECT {} FROM user WHERE {}", COLUMNS, filter)
}

pub(crate) fn create(db: &Database, user: &User) -> Result<User> {
    let id = db.write_once(|w| w.insert(INSERT, &user.to_params()))?;
    tracing::debug!(username = %user.username, id, "user inserted");
    Ok(User { id, ..user.clone() })
}

pub(crate) fn find_by_id(db: &Database, id: i64) -> Result<User> {
    db.view(|r| r.query_opt(&select("id = :id"), &Params::new().with("id", id), from_row))?
        .ok_or_else(|| not_found("user", id))
}

pub(crate) fn find_by_username(db: &Database, username: &str) -> Result<User> {
    db.view(|r| {
        r.query_opt(
            &select("username = :username"),
            &Params::new().with("username", username.to_string()),
            from_row,
        )
    })?
    .ok_or_else(|| not_found("user", username))
}

pub(crate) fn update(db: &Database, user: &User) -> Result<User> {
    let rows = db.write_once(|w| w.execute(UPDATE, &user.to_params()))?;
    if rows == 0 {
        return Err(no_rows_updated("user", user.id));
    }
    Ok(user.clone())
}

pub(crate) fn delete(db: &Database, id: i64) -> Result<User> {
    db.transact(|w| {
        let params = Params::new().with("id", id);
        let user = w
            .query_opt(&select("id = :id"), &params, from_row)?
            .ok_or_else(|| not_found("user", id))?;
        w.execute("DELETE FROM user WHERE id = :id", &params)?;
        Ok(user)
    })
}
