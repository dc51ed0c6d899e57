//! Composite-key resolution
//!
//! Callers may identify a row by its surrogate id, by its foreign key plus
//! natural key, or by the natural keys of its ancestors
//! (username -> box name -> version -> provider name). Each entity has an
//! ordered list of [`Strategy`] values; the first one that applies wins.
//!
//! A strategy returns `Ok(None)` when the identifying data it needs is
//! absent, which moves on to the next strategy. Any `Err` (including
//! `NotFound` from a parent lookup) aborts the chain.

use crate::errors::{invalid_data, Result};
use crate::model::{Provider, User, VagrantBox, Version};
use crate::repository::BoxRepository;

/// One way of turning partial identifying data into a row id
pub struct Strategy<C> {
    pub name: &'static str,
    pub resolve: fn(&C) -> Result<Option<i64>>,
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: &'static str,
    pub id: i64,
}

/// Try each strategy in order; `None` if none applied
///
/// # Errors
///
/// Returns the first error a strategy raises.
pub fn try_resolve<C>(ctx: &C, chain: &[Strategy<C>]) -> Result<Option<Resolution>> {
    for strategy in chain {
        if let Some(id) = (strategy.resolve)(ctx)? {
            tracing::debug!(strategy = strategy.name, id, "resolved");
            return Ok(Some(Resolution {
                strategy: strategy.name,
                id,
            }));
        }
    }
    Ok(None)
}

/// Like [`try_resolve`], but a chain where nothing applied is `InvalidData`
///
/// # Errors
///
/// `InvalidData` when no strategy applied, or the first strategy error.
pub fn resolve<C>(ctx: &C, chain: &[Strategy<C>], entity: &'static str) -> Result<Resolution> {
    try_resolve(ctx, chain)?.ok_or_else(|| {
        invalid_data(
            entity,
            format!("missing {} ID or enough data to find it", entity),
        )
    })
}

/// Identifying data for a user lookup
pub struct UserTarget<'a, R: ?Sized> {
    pub repo: &'a R,
    pub user: &'a User,
}

/// Identifying data for box, version and provider lookups
///
/// Fields the caller did not supply are left at their defaults.
pub struct Target<'a, R: ?Sized> {
    pub repo: &'a R,
    pub vbox: &'a VagrantBox,
    pub version: &'a Version,
    pub provider: &'a Provider,
}

fn nonzero(id: i64) -> Option<i64> {
    (id != 0).then_some(id)
}

pub fn user_strategies<'a, R: BoxRepository + ?Sized>() -> Vec<Strategy<UserTarget<'a, R>>> {
    vec![
        Strategy {
            name: "user_id",
            resolve: |t| Ok(nonzero(t.user.id)),
        },
        Strategy {
            name: "username",
            resolve: user_by_username::<R>,
        },
    ]
}

fn user_by_username<R: BoxRepository + ?Sized>(t: &UserTarget<'_, R>) -> Result<Option<i64>> {
    if t.user.username.is_empty() {
        return Ok(None);
    }
    Ok(Some(t.repo.find_user_by_username(&t.user.username)?.id))
}

pub fn box_strategies<'a, R: BoxRepository + ?Sized>() -> Vec<Strategy<Target<'a, R>>> {
    vec![
        Strategy {
            name: "box_id",
            resolve: |t| Ok(nonzero(t.vbox.id)),
        },
        Strategy {
            name: "username_and_name",
            resolve: box_by_username::<R>,
        },
    ]
}

fn box_by_username<R: BoxRepository + ?Sized>(t: &Target<'_, R>) -> Result<Option<i64>> {
    if t.vbox.username.is_empty() || t.vbox.name.is_empty() {
        return Ok(None);
    }
    let found = t
        .repo
        .find_box_by_username(&t.vbox.username, &t.vbox.name)?;
    Ok(Some(found.id))
}

pub fn version_strategies<'a, R: BoxRepository + ?Sized>() -> Vec<Strategy<Target<'a, R>>> {
    vec![
        Strategy {
            name: "version_id",
            resolve: |t| Ok(nonzero(t.version.id)),
        },
        Strategy {
            name: "version_box_id",
            resolve: version_by_own_box_id::<R>,
        },
        Strategy {
            name: "parent_box",
            resolve: version_by_parent_box::<R>,
        },
    ]
}

fn version_by_own_box_id<R: BoxRepository + ?Sized>(t: &Target<'_, R>) -> Result<Option<i64>> {
    if t.version.box_id == 0 || t.version.version.is_empty() {
        return Ok(None);
    }
    let found = t
        .repo
        .find_version_by_box_id(t.version.box_id, &t.version.version)?;
    Ok(Some(found.id))
}

fn version_by_parent_box<R: BoxRepository + ?Sized>(t: &Target<'_, R>) -> Result<Option<i64>> {
    if t.version.version.is_empty() {
        return Ok(None);
    }
    let Some(parent) = try_resolve(t, &box_strategies::<R>())? else {
        return Ok(None);
    };
    let found = t
        .repo
        .find_version_by_box_id(parent.id, &t.version.version)?;
    Ok(Some(found.id))
}

pub fn provider_strategies<'a, R: BoxRepository + ?Sized>() -> Vec<Strategy<Target<'a, R>>> {
    vec![
        Strategy {
            name: "provider_id",
            resolve: |t| Ok(nonzero(t.provider.id)),
        },
        Strategy {
            name: "provider_version_id",
            resolve: provider_by_own_version_id::<R>,
        },
        Strategy {
            name: "parent_version",
            resolve: provider_by_parent_version::<R>,
        },
    ]
}

fn provider_by_own_version_id<R: BoxRepository + ?Sized>(
    t: &Target<'_, R>,
) -> Result<Option<i64>> {
    if t.provider.version_id == 0 || t.provider.name.is_empty() {
        return Ok(None);
    }
    let found = t
        .repo
        .find_provider_by_version_id(t.provider.version_id, &t.provider.name)?;
    Ok(Some(found.id))
}

fn provider_by_parent_version<R: BoxRepository + ?Sized>(
    t: &Target<'_, R>,
) -> Result<Option<i64>> {
    if t.provider.name.is_empty() {
        return Ok(None);
    }
    let Some(parent) = try_resolve(t, &version_strategies::<R>())? else {
        return Ok(None);
    };
    let found = t
        .repo
        .find_provider_by_version_id(parent.id, &t.provider.name)?;
    Ok(Some(found.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    struct Ctx {
        a: Option<i64>,
        b: Option<i64>,
    }

    fn chain() -> Vec<Strategy<Ctx>> {
        vec![
            Strategy {
                name: "a",
                resolve: |c| Ok(c.a),
            },
            Strategy {
                name: "b",
                resolve: |c| Ok(c.b),
            },
        ]
    }

    #[test]
    fn test_first_applicable_strategy_wins() {
        let ctx = Ctx {
            a: Some(1),
            b: Some(2),
        };
        let r = resolve(&ctx, &chain(), "thing").unwrap();
        assert_eq!(r, Resolution { strategy: "a", id: 1 });
    }

    #[test]
    fn test_absent_data_falls_through() {
        let ctx = Ctx { a: None, b: Some(2) };
        assert_eq!(resolve(&ctx, &chain(), "thing").unwrap().strategy, "b");
    }

    #[test]
    fn test_exhausted_chain_is_invalid_data() {
        let ctx = Ctx { a: None, b: None };
        assert!(try_resolve(&ctx, &chain()).unwrap().is_none());
        let err = resolve(&ctx, &chain(), "thing").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidData);
    }

    #[test]
    fn test_error_aborts_chain() {
        let failing: Vec<Strategy<Ctx>> = vec![
            Strategy {
                name: "boom",
                resolve: |_| Err(crate::errors::not_found("thing", "x")),
            },
            Strategy {
                name: "never",
                resolve: |_| Ok(Some(9)),
            },
        ];
        let ctx = Ctx { a: None, b: None };
        let err = resolve(&ctx, &failing, "thing").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }
}
