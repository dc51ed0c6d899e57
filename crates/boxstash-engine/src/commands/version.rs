//! Version operations
//!
//! A version is located by its id, by `version.box_id` plus version string,
//! or by the parent box (id, or username and name) plus version string.

use boxstash_core::errors::{invalid_data, Result};
use boxstash_core::resolve::{resolve, version_strategies};
use boxstash_core::{BoxRepository, Provider, VagrantBox, Version, VersionStatus};

use crate::service::{observe, BoxService};

impl<R: BoxRepository> BoxService<R> {
    /// Create a version under the box identified by `version.box_id` or `vbox`
    ///
    /// # Errors
    ///
    /// `InvalidData` without a version string or parent box identifiers,
    /// `NotFound` for an unknown parent box.
    pub fn create_version(&self, vbox: &VagrantBox, version: &Version) -> Result<Version> {
        observe("create_version", || {
            if version.version.is_empty() {
                return Err(invalid_data("version", "missing version.version"));
            }
            let box_id = match version.box_id {
                0 => self.resolve_box(vbox)?,
                id => id,
            };
            self.repo.create_version(&Version {
                box_id,
                ..version.clone()
            })?;
            let stored = self.repo.find_version_by_box_id(box_id, &version.version)?;
            self.with_providers(stored)
        })
    }

    /// Look one version up, with its providers
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` when the version or
    /// a parent is unknown.
    pub fn find_version(&self, vbox: &VagrantBox, version: &Version) -> Result<Version> {
        observe("find_version", || {
            let id = self.resolve_version(vbox, version)?;
            let stored = self.repo.find_version_by_id(id)?;
            self.with_providers(stored)
        })
    }

    /// Every version of a box, each with its providers
    ///
    /// # Errors
    ///
    /// `InvalidData` without box identifiers, `NotFound` for an unknown box.
    pub fn list_versions(&self, vbox: &VagrantBox) -> Result<Vec<Version>> {
        observe("list_versions", || {
            let box_id = self.resolve_box(vbox)?;
            self.versions_of(box_id)
        })
    }

    /// Update a version, returning the stored row
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` when the version or
    /// a parent is unknown.
    pub fn update_version(&self, vbox: &VagrantBox, version: &Version) -> Result<Version> {
        observe("update_version", || self.write_version(vbox, version, None))
    }

    /// Mark a version `released`, leaving every other field as stored
    ///
    /// # Errors
    ///
    /// Same as [`BoxService::find_version`].
    pub fn release_version(&self, vbox: &VagrantBox, version: &Version) -> Result<Version> {
        observe("release_version", || {
            self.write_version(vbox, version, Some(VersionStatus::Released))
        })
    }

    /// Mark a version `revoked`, leaving every other field as stored
    ///
    /// # Errors
    ///
    /// Same as [`BoxService::find_version`].
    pub fn revoke_version(&self, vbox: &VagrantBox, version: &Version) -> Result<Version> {
        observe("revoke_version", || {
            self.write_version(vbox, version, Some(VersionStatus::Revoked))
        })
    }

    /// Delete a version and, by cascade, its providers
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` when the version or
    /// a parent is unknown.
    pub fn delete_version(&self, vbox: &VagrantBox, version: &Version) -> Result<Version> {
        observe("delete_version", || {
            let id = self.resolve_version(vbox, version)?;
            self.repo.delete_version(id)
        })
    }

    pub(crate) fn resolve_version(&self, vbox: &VagrantBox, version: &Version) -> Result<i64> {
        let provider = Provider::default();
        let target = self.target(vbox, version, &provider);
        Ok(resolve(&target, &version_strategies(), "version")?.id)
    }

    /// Shared body of update/release/revoke
    ///
    /// `status` set means only the status changes; otherwise the caller's
    /// fields are written as given.
    fn write_version(
        &self,
        vbox: &VagrantBox,
        version: &Version,
        status: Option<VersionStatus>,
    ) -> Result<Version> {
        if version.id == 0 && version.version.is_empty() {
            return Err(invalid_data("version", "missing version.id or version.version"));
        }
        let id = self.resolve_version(vbox, version)?;
        let existing = self.repo.find_version_by_id(id)?;
        let mut changed = match status {
            Some(status) => Version {
                status,
                ..existing.clone()
            },
            None => Version {
                id,
                box_id: existing.box_id,
                ..version.clone()
            },
        };
        if changed.version.is_empty() {
            changed.version = existing.version.clone();
        }
        self.repo.update_version(&changed)?;
        let stored = self
            .repo
            .find_version_by_box_id(existing.box_id, &changed.version)?;
        self.with_providers(stored)
    }
}
