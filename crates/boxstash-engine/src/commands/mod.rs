//! Service operations, one module per entity
//!
//! ## Logging Ownership
//!
//! Every public operation logs `start`, then `end` or `end_error`, through
//! the core lifecycle macros. Helpers shared between operations do not log,
//! so nested calls never emit a second lifecycle pair.

pub mod provider;
pub mod user;
pub mod vagrant_box;
pub mod version;
