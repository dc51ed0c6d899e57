//! Persistence seam for the service layer
//!
//! Implemented by `boxstash_store::SqliteRepository`. Every method operates
//! on a single entity type; cross-entity lookups belong to [`crate::resolve`].

use crate::errors::Result;
use crate::model::{Provider, User, VagrantBox, Version};

/// Create/read/update/delete/list operations for users, boxes, versions and providers
///
/// # Errors
///
/// Reads of a missing row fail with `NotFound`, updates matching zero rows
/// with `NoRowsUpdated`; storage failures surface as `Persistence` or
/// `ConstraintViolation`.
pub trait BoxRepository {
    fn create_user(&self, user: &User) -> Result<User>;
    fn delete_user(&self, id: i64) -> Result<User>;
    fn find_user_by_id(&self, id: i64) -> Result<User>;
    fn find_user_by_username(&self, username: &str) -> Result<User>;
    fn update_user(&self, user: &User) -> Result<User>;

    fn create_box(&self, vbox: &VagrantBox) -> Result<VagrantBox>;
    fn delete_box(&self, id: i64) -> Result<VagrantBox>;
    fn list_boxes(&self, username: &str) -> Result<Vec<VagrantBox>>;
    fn find_box_by_id(&self, id: i64) -> Result<VagrantBox>;
    fn find_box_by_username(&self, username: &str, name: &str) -> Result<VagrantBox>;
    fn update_box(&self, vbox: &VagrantBox) -> Result<VagrantBox>;

    fn create_version(&self, version: &Version) -> Result<Version>;
    fn delete_version(&self, id: i64) -> Result<Version>;
    fn list_versions(&self, box_id: i64) -> Result<Vec<Version>>;
    fn find_version_by_id(&self, id: i64) -> Result<Version>;
    fn find_version_by_box_id(&self, box_id: i64, version: &str) -> Result<Version>;
    fn update_version(&self, version: &Version) -> Result<Version>;

    fn create_provider(&self, provider: &Provider) -> Result<Provider>;
    fn delete_provider(&self, id: i64) -> Result<Provider>;
    fn list_providers(&self, version_id: i64) -> Result<Vec<Provider>>;
    fn find_provider_by_id(&self, id: i64) -> Result<Provider>;
    fn find_provider_by_version_id(&self, version_id: i64, name: &str) -> Result<Provider>;
    fn update_provider(&self, provider: &Provider) -> Result<Provider>;
}
