//! User operations

use boxstash_core::errors::{invalid_data, Result};
use boxstash_core::resolve::{resolve, user_strategies, UserTarget};
use boxstash_core::{BoxRepository, User};

use crate::service::{observe, BoxService};

impl<R: BoxRepository> BoxService<R> {
    /// Create a user and return the stored row
    ///
    /// # Errors
    ///
    /// `InvalidData` without a username, `ConstraintViolation` if it is taken.
    pub fn create_user(&self, user: &User) -> Result<User> {
        observe("create_user", || {
            if user.username.is_empty() {
                return Err(invalid_data("user", "missing user.username"));
            }
            self.repo.create_user(user)?;
            let mut stored = self.repo.find_user_by_username(&user.username)?;
            stored.boxes = self.boxes_of(&stored.username)?;
            Ok(stored)
        })
    }

    /// Look a user up by username, with all of their boxes
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown username.
    pub fn find_user(&self, username: &str) -> Result<User> {
        observe("find_user", || {
            let mut user = self.repo.find_user_by_username(username)?;
            user.boxes = self.boxes_of(username)?;
            Ok(user)
        })
    }

    /// Update a user identified by id or username
    ///
    /// # Errors
    ///
    /// `InvalidData` without id or username, `NotFound` for an unknown user.
    pub fn update_user(&self, user: &User) -> Result<User> {
        observe("update_user", || {
            let id = self.resolve_user(user)?;
            let existing = self.repo.find_user_by_id(id)?;
            self.repo.update_user(&User {
                id,
                username: existing.username.clone(),
                ..user.clone()
            })?;
            let mut stored = self.repo.find_user_by_username(&existing.username)?;
            stored.boxes = self.boxes_of(&stored.username)?;
            Ok(stored)
        })
    }

    /// Delete a user and, by cascade, everything they own
    ///
    /// # Errors
    ///
    /// `InvalidData` without id or username, `NotFound` for an unknown user.
    pub fn delete_user(&self, user: &User) -> Result<User> {
        observe("delete_user", || {
            let id = self.resolve_user(user)?;
            self.repo.delete_user(id)
        })
    }

    fn resolve_user(&self, user: &User) -> Result<i64> {
        let target = UserTarget {
            repo: &self.repo,
            user,
        };
        Ok(resolve(&target, &user_strategies(), "user")?.id)
    }
}
