//! Boxstash Store - SQLite persistence for box metadata
//!
//! Provides:
//! - The [`db::Database`] connection guard (view / write_once / transact)
//! - Named-parameter query binding
//! - Schema migrations with an applied-name ledger
//! - [`repo::SqliteRepository`], the `BoxRepository` implementation

pub mod binder;
pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use binder::{bind_named, BoundQuery, Params, ToParams};
pub use config::StoreConfig;
pub use db::{Database, Reader, Writer};
pub use errors::Result;
pub use migrations::MigrationReport;
pub use repo::SqliteRepository;
