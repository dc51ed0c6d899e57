//! Structured logging facility for Boxstash
//!
//! This module provides:
//! - Single initialization point via `init(profile)` / `init_with_level`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use boxstash_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! The service layer owns `start`/`end`/`end_error` events for each operation.
//! The store only emits `tracing::debug!` details.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_level, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
