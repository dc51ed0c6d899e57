//! Version commands

use boxstash_core::{BoxRepository, Version};
use boxstash_engine::BoxService;
use clap::{Args, Subcommand};

use super::{print_json, BoxRef, VersionRef};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    pub command: VersionCommand,
}

#[derive(Debug, Subcommand)]
pub enum VersionCommand {
    /// Add an unreleased version to a box
    Create(VersionFields),
    /// Show a version with its providers
    Show(VersionRef),
    /// List the versions of a box
    List(BoxRef),
    /// Change version fields
    Update(VersionFields),
    /// Mark a version released
    Release(VersionRef),
    /// Mark a version revoked
    Revoke(VersionRef),
    /// Delete a version with its providers
    Delete(VersionRef),
}

#[derive(Debug, Args)]
pub struct VersionFields {
    #[command(flatten)]
    pub target: VersionRef,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub description_markdown: Option<String>,
}

impl VersionFields {
    fn apply(self, version: &mut Version) {
        if let Some(v) = self.description {
            version.description = v;
        }
        if let Some(v) = self.description_markdown {
            version.description_markdown = v;
        }
    }
}

pub fn execute<R: BoxRepository>(
    service: &BoxService<R>,
    args: VersionArgs,
) -> Result<(), CliError> {
    match args.command {
        VersionCommand::Create(fields) => {
            let vbox = fields.target.vbox.to_box();
            let mut version = fields.target.to_version();
            fields.apply(&mut version);
            print_json(&service.create_version(&vbox, &version)?)
        }
        VersionCommand::Show(target) => {
            print_json(&service.find_version(&target.vbox.to_box(), &target.to_version())?)
        }
        VersionCommand::List(target) => print_json(&service.list_versions(&target.to_box())?),
        VersionCommand::Update(fields) => {
            let vbox = fields.target.vbox.to_box();
            let mut version = service.find_version(&vbox, &fields.target.to_version())?;
            fields.apply(&mut version);
            print_json(&service.update_version(&vbox, &version)?)
        }
        VersionCommand::Release(target) => {
            print_json(&service.release_version(&target.vbox.to_box(), &target.to_version())?)
        }
        VersionCommand::Revoke(target) => {
            print_json(&service.revoke_version(&target.vbox.to_box(), &target.to_version())?)
        }
        VersionCommand::Delete(target) => {
            print_json(&service.delete_version(&target.vbox.to_box(), &target.to_version())?)
        }
    }
}
