//! Entity model
//!
//! A [`User`] owns boxes, a [`VagrantBox`] owns versions and a [`Version`]
//! owns providers. Surrogate keys are assigned by storage; `0` means the
//! caller did not supply one.

pub mod provider;
pub mod user;
pub mod vagrant_box;
pub mod version;

pub use provider::Provider;
pub use user::User;
pub use vagrant_box::VagrantBox;
pub use version::{current_version, Version, VersionStatus};

/// Lifecycle stamping for entities carrying created/updated timestamps
pub trait Timestamped {
    /// Set both timestamps on creation
    fn stamp_created(&mut self, now: i64);
    /// Refresh `updated_at` on a mutating write
    fn stamp_updated(&mut self, now: i64);
}

macro_rules! impl_timestamped {
    ($($ty:ty),+) => {
        $(
            impl Timestamped for $ty {
                fn stamp_created(&mut self, now: i64) {
                    self.created_at = now;
                    self.updated_at = now;
                }

                fn stamp_updated(&mut self, now: i64) {
                    self.updated_at = now;
                }
            }
        )+
    };
}

impl_timestamped!(VagrantBox, Version, Provider);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_created_sets_both() {
        let mut b = VagrantBox::new("jdoe", "base");
        b.stamp_created(10);
        assert_eq!((b.created_at, b.updated_at), (10, 10));
    }

    #[test]
    fn test_stamp_updated_keeps_created() {
        let mut p = Provider::new("virtualbox");
        p.stamp_created(10);
        p.stamp_updated(25);
        assert_eq!((p.created_at, p.updated_at), (10, 25));
    }
}
