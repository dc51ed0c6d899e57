//! Subcommands
//!
//! Each entity subcommand maps flags onto a `BoxService` call and prints the
//! returned rows as pretty JSON on stdout.

pub mod migrate;
pub mod provider;
pub mod user;
pub mod vagrant_box;
pub mod version;

use clap::Args;
use serde::Serialize;

use crate::error::CliError;

/// Owner and name of a box
#[derive(Debug, Clone, Args)]
pub struct BoxRef {
    /// Owning user or organization
    pub username: String,
    /// Box name
    pub name: String,
}

impl BoxRef {
    pub fn to_box(&self) -> boxstash_core::VagrantBox {
        boxstash_core::VagrantBox::new(&self.username, &self.name)
    }
}

/// A version of a box
#[derive(Debug, Clone, Args)]
pub struct VersionRef {
    #[command(flatten)]
    pub vbox: BoxRef,
    /// Version string, e.g. 1.0.0
    pub version: String,
}

impl VersionRef {
    pub fn to_version(&self) -> boxstash_core::Version {
        boxstash_core::Version::new(&self.version)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
