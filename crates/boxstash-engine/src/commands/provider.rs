//! Provider operations
//!
//! A provider is located by its id, by `provider.version_id` plus name, or by
//! the parent version (see the version chain) plus name.

use boxstash_core::errors::{invalid_data, Result};
use boxstash_core::resolve::{provider_strategies, resolve};
use boxstash_core::{BoxRepository, Provider, VagrantBox, Version};

use crate::service::{observe, BoxService};

impl<R: BoxRepository> BoxService<R> {
    /// Create a provider under the version identified by `provider.version_id`
    /// or `vbox` and `version`
    ///
    /// # Errors
    ///
    /// `InvalidData` without a name or parent identifiers, `NotFound` for an
    /// unknown parent.
    pub fn create_provider(
        &self,
        vbox: &VagrantBox,
        version: &Version,
        provider: &Provider,
    ) -> Result<Provider> {
        observe("create_provider", || {
            if provider.name.is_empty() {
                return Err(invalid_data("provider", "missing provider.name"));
            }
            let version_id = match provider.version_id {
                0 => self.resolve_version(vbox, version)?,
                id => id,
            };
            self.repo.create_provider(&Provider {
                version_id,
                ..provider.clone()
            })?;
            self.repo
                .find_provider_by_version_id(version_id, &provider.name)
        })
    }

    /// Look one provider up
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` when the provider
    /// or a parent is unknown.
    pub fn find_provider(
        &self,
        vbox: &VagrantBox,
        version: &Version,
        provider: &Provider,
    ) -> Result<Provider> {
        observe("find_provider", || {
            let id = self.resolve_provider(vbox, version, provider)?;
            self.repo.find_provider_by_id(id)
        })
    }

    /// Every provider of one version
    ///
    /// # Errors
    ///
    /// `InvalidData` without version identifiers, `NotFound` for an unknown
    /// version or box.
    pub fn list_providers(&self, vbox: &VagrantBox, version: &Version) -> Result<Vec<Provider>> {
        observe("list_providers", || {
            let version_id = self.resolve_version(vbox, version)?;
            self.repo.list_providers(version_id)
        })
    }

    /// Update a provider, returning the stored row
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` when the provider
    /// or a parent is unknown.
    pub fn update_provider(
        &self,
        vbox: &VagrantBox,
        version: &Version,
        provider: &Provider,
    ) -> Result<Provider> {
        observe("update_provider", || {
            let id = self.resolve_provider(vbox, version, provider)?;
            let existing = self.repo.find_provider_by_id(id)?;
            let name = if provider.name.is_empty() {
                existing.name.clone()
            } else {
                provider.name.clone()
            };
            self.repo.update_provider(&Provider {
                id,
                name: name.clone(),
                version_id: existing.version_id,
                ..provider.clone()
            })?;
            self.repo
                .find_provider_by_version_id(existing.version_id, &name)
        })
    }

    /// Delete one provider; its version is left in place
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` when the provider
    /// or a parent is unknown.
    pub fn delete_provider(
        &self,
        vbox: &VagrantBox,
        version: &Version,
        provider: &Provider,
    ) -> Result<Provider> {
        observe("delete_provider", || {
            let id = self.resolve_provider(vbox, version, provider)?;
            self.repo.delete_provider(id)
        })
    }

    fn resolve_provider(
        &self,
        vbox: &VagrantBox,
        version: &Version,
        provider: &Provider,
    ) -> Result<i64> {
        let target = self.target(vbox, version, provider);
        Ok(resolve(&target, &provider_strategies(), "provider")?.id)
    }
}
