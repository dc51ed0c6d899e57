//! Box operations

use boxstash_core::errors::{invalid_data, Result};
use boxstash_core::resolve::{box_strategies, resolve};
use boxstash_core::{BoxRepository, Provider, VagrantBox, Version};

use crate::service::{observe, BoxService};

impl<R: BoxRepository> BoxService<R> {
    /// Create a box owned by `vbox.username`
    ///
    /// The owner's id is taken from `vbox.user_id` when set, otherwise looked
    /// up by username.
    ///
    /// # Errors
    ///
    /// `InvalidData` without both name and username, `NotFound` for an
    /// unknown owner, `ConstraintViolation` for a duplicate name.
    pub fn create_box(&self, vbox: &VagrantBox) -> Result<VagrantBox> {
        observe("create_box", || {
            if vbox.name.is_empty() || vbox.username.is_empty() {
                return Err(invalid_data("box", "missing box.username or box.name"));
            }
            let user_id = match vbox.user_id {
                0 => self.repo.find_user_by_username(&vbox.username)?.id,
                id => id,
            };
            self.repo.create_box(&VagrantBox {
                user_id,
                ..vbox.clone()
            })?;
            let stored = self.repo.find_box_by_username(&vbox.username, &vbox.name)?;
            self.decorate_box(stored)
        })
    }

    /// Look a box up by owner and name, with versions and current version
    ///
    /// # Errors
    ///
    /// `NotFound` when no such box exists.
    pub fn find_box(&self, username: &str, name: &str) -> Result<VagrantBox> {
        observe("find_box", || {
            let stored = self.repo.find_box_by_username(username, name)?;
            self.decorate_box(stored)
        })
    }

    /// Every box owned by `username`, each decorated
    ///
    /// # Errors
    ///
    /// Storage failures only; an unknown username lists nothing.
    pub fn list_boxes(&self, username: &str) -> Result<Vec<VagrantBox>> {
        observe("list_boxes", || self.boxes_of(username))
    }

    /// Update a box identified by id or username and name
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` for an unknown box.
    pub fn update_box(&self, vbox: &VagrantBox) -> Result<VagrantBox> {
        observe("update_box", || {
            let id = self.resolve_box(vbox)?;
            let existing = self.repo.find_box_by_id(id)?;
            let name = if vbox.name.is_empty() {
                existing.name.clone()
            } else {
                vbox.name.clone()
            };
            self.repo.update_box(&VagrantBox {
                id,
                name: name.clone(),
                user_id: existing.user_id,
                username: existing.username.clone(),
                ..vbox.clone()
            })?;
            let stored = self.repo.find_box_by_username(&existing.username, &name)?;
            self.decorate_box(stored)
        })
    }

    /// Delete a box and, by cascade, its versions and providers
    ///
    /// # Errors
    ///
    /// `InvalidData` without identifying data, `NotFound` for an unknown box.
    pub fn delete_box(&self, vbox: &VagrantBox) -> Result<VagrantBox> {
        observe("delete_box", || {
            let id = self.resolve_box(vbox)?;
            self.repo.delete_box(id)
        })
    }

    pub(crate) fn resolve_box(&self, vbox: &VagrantBox) -> Result<i64> {
        let (version, provider) = (Version::default(), Provider::default());
        let target = self.target(vbox, &version, &provider);
        Ok(resolve(&target, &box_strategies(), "box")?.id)
    }
}
