//! Boxstash Core - domain model, error and logging facilities
//!
//! Provides:
//! - Entity model (users, boxes, versions, providers) with lifecycle stamping
//! - Timestamp helpers and the injectable [`time::Clock`]
//! - The [`repository::BoxRepository`] persistence seam
//! - Composite-key resolution strategies
//! - The `ExError` facility and structured logging macros

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod repository;
pub mod resolve;
pub mod time;

pub use boxstash_core_types::schema;
pub use errors::{ExError, ExErrorKind, Result};
pub use model::{Provider, Timestamped, User, VagrantBox, Version, VersionStatus};
pub use repository::BoxRepository;
