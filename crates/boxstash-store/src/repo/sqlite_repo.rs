//! SQLite repository implementation
//!
//! Reads run under `view`, inserts and updates under `write_once`, and
//! deletes read-then-delete under `transact` so the removed row can be
//! returned to the caller.

use std::sync::Arc;

use boxstash_core::errors::Result;
use boxstash_core::time::{Clock, SystemClock};
use boxstash_core::{BoxRepository, Provider, User, VagrantBox, Version};

use super::{provider, user, vagrant_box, version};
use crate::db::Database;

/// `BoxRepository` backed by a shared [`Database`]
#[derive(Clone)]
pub struct SqliteRepository {
    db: Arc<Database>,
    clock: Arc<dyn Clock>,
}

impl SqliteRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    /// Use `clock` for created/updated stamping
    pub fn with_clock(db: Arc<Database>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}

impl BoxRepository for SqliteRepository {
    fn create_user(&self, u: &User) -> Result<User> {
        user::create(&self.db, u)
    }

    fn delete_user(&self, id: i64) -> Result<User> {
        user::delete(&self.db, id)
    }

    fn find_user_by_id(&self, id: i64) -> Result<User> {
        user::find_by_id(&self.db, id)
    }

    fn find_user_by_username(&self, username: &str) -> Result<User> {
        user::find_by_username(&self.db, username)
    }

    fn update_user(&self, u: &User) -> Result<User> {
        user::update(&self.db, u)
    }

    fn create_box(&self, vbox: &VagrantBox) -> Result<VagrantBox> {
        vagrant_box::create(&self.db, self.clock.as_ref(), vbox)
    }

    fn delete_box(&self, id: i64) -> Result<VagrantBox> {
        vagrant_box::delete(&self.db, id)
    }

    fn list_boxes(&self, username: &str) -> Result<Vec<VagrantBox>> {
        vagrant_box::list(&self.db, username)
    }

    fn find_box_by_id(&self, id: i64) -> Result<VagrantBox> {
        vagrant_box::find_by_id(&self.db, id)
    }

    fn find_box_by_username(&self, username: &str, name: &str) -> Result<VagrantBox> {
        vagrant_box::find_by_username(&self.db, username, name)
    }

    fn update_box(&self, vbox: &VagrantBox) -> Result<VagrantBox> {
        vagrant_box::update(&self.db, self.clock.as_ref(), vbox)
    }

    fn create_version(&self, v: &Version) -> Result<Version> {
        version::create(&self.db, self.clock.as_ref(), v)
    }

    fn delete_version(&self, id: i64) -> Result<Version> {
        version::delete(&self.db, id)
    }

    fn list_versions(&self, box_id: i64) -> Result<Vec<Version>> {
        version::list(&self.db, box_id)
    }

    fn find_version_by_id(&self, id: i64) -> Result<Version> {
        version::find_by_id(&self.db, id)
    }

    fn find_version_by_box_id(&self, box_id: i64, v: &str) -> Result<Version> {
        version::find_by_box_id(&self.db, box_id, v)
    }

    fn update_version(&self, v: &Version) -> Result<Version> {
        version::update(&self.db, self.clock.as_ref(), v)
    }

    fn create_provider(&self, p: &Provider) -> Result<Provider> {
        provider::create(&self.db, self.clock.as_ref(), p)
    }

    fn delete_provider(&self, id: i64) -> Result<Provider> {
        provider::delete(&self.db, id)
    }

    fn list_providers(&self, version_id: i64) -> Result<Vec<Provider>> {
        provider::list(&self.db, version_id)
    }

    fn find_provider_by_id(&self, id: i64) -> Result<Provider> {
        provider::find_by_id(&self.db, id)
    }

    fn find_provider_by_version_id(&self, version_id: i64, name: &str) -> Result<Provider> {
        provider::find_by_version_id(&self.db, version_id, name)
    }

    fn update_provider(&self, p: &Provider) -> Result<Provider> {
        provider::update(&self.db, self.clock.as_ref(), p)
    }
}
