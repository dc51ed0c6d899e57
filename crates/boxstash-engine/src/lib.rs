//! Boxstash Engine - service layer
//!
//! [`BoxService`] turns partially-identified requests into concrete rows via
//! the resolver chains, performs the write, and returns the stored row with
//! its derived children (boxes, versions, providers, current version).

pub mod commands;
pub mod service;

pub use service::BoxService;
