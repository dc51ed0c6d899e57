//! BoxService and the helpers shared by its operations

use std::sync::Arc;
use std::time::Instant;

use boxstash_core::errors::Result;
use boxstash_core::model::current_version;
use boxstash_core::resolve::Target;
use boxstash_core::{log_op_end, log_op_error, log_op_start};
use boxstash_core::{BoxRepository, Provider, VagrantBox, Version};
use boxstash_store::{Database, SqliteRepository, StoreConfig};

/// Resolver-driven operations over a [`BoxRepository`]
pub struct BoxService<R> {
    pub(crate) repo: R,
}

impl<R: BoxRepository> BoxService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub(crate) fn target<'a>(
        &'a self,
        vbox: &'a VagrantBox,
        version: &'a Version,
        provider: &'a Provider,
    ) -> Target<'a, R> {
        Target {
            repo: &self.repo,
            vbox,
            version,
            provider,
        }
    }

    /// Attach providers to one version
    pub(crate) fn with_providers(&self, mut version: Version) -> Result<Version> {
        version.providers = self.repo.list_providers(version.id)?;
        Ok(version)
    }

    /// All versions of a box, each with its providers
    pub(crate) fn versions_of(&self, box_id: i64) -> Result<Vec<Version>> {
        self.repo
            .list_versions(box_id)?
            .into_iter()
            .map(|v| self.with_providers(v))
            .collect()
    }

    /// Attach versions and the derived current version to a box
    pub(crate) fn decorate_box(&self, mut vbox: VagrantBox) -> Result<VagrantBox> {
        vbox.versions = self.versions_of(vbox.id)?;
        vbox.current_version = current_version(&vbox.versions);
        Ok(vbox)
    }

    /// Every box owned by `username`, decorated
    pub(crate) fn boxes_of(&self, username: &str) -> Result<Vec<VagrantBox>> {
        self.repo
            .list_boxes(username)?
            .into_iter()
            .map(|b| self.decorate_box(b))
            .collect()
    }
}

impl BoxService<SqliteRepository> {
    /// Open (and migrate) the SQLite store named by `config`
    ///
    /// # Errors
    ///
    /// `Config` or `Persistence` from [`Database::open`].
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let db = Database::open(config)?;
        Ok(Self::new(SqliteRepository::new(Arc::new(db))))
    }
}

/// Wrap one operation in start/end/end_error lifecycle logging
pub(crate) fn observe<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = Instant::now();
    match f() {
        Ok(value) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
            Ok(value)
        }
        Err(err) => {
            log_op_error!(op, &err, duration_ms = start.elapsed().as_millis() as u64);
            if err.op().is_some() {
                Err(err)
            } else {
                Err(err.with_op(op))
            }
        }
    }
}
