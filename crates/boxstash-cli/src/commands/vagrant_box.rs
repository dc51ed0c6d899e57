//! Box commands

use boxstash_core::{BoxRepository, VagrantBox};
use boxstash_engine::BoxService;
use clap::{Args, Subcommand};

use super::{print_json, BoxRef};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct BoxArgs {
    #[command(subcommand)]
    pub command: BoxCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoxCommand {
    /// Create a box for an existing user
    Create(BoxFields),
    /// Show a box with its versions and current version
    Show(BoxRef),
    /// List every box a user owns
    List { username: String },
    /// Change box fields
    Update(BoxFields),
    /// Delete a box with its versions and providers
    Delete(BoxRef),
}

#[derive(Debug, Args)]
pub struct BoxFields {
    #[command(flatten)]
    pub target: BoxRef,
    /// New name (update only)
    #[arg(long)]
    pub rename: Option<String>,
    #[arg(long)]
    pub private: Option<bool>,
    #[arg(long)]
    pub short_description: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
}

impl BoxFields {
    fn apply(self, vbox: &mut VagrantBox) {
        if let Some(v) = self.rename {
            vbox.name = v;
        }
        if let Some(v) = self.private {
            vbox.is_private = v;
        }
        if let Some(v) = self.short_description {
            vbox.short_description = v;
        }
        if let Some(v) = self.description {
            vbox.description = v;
        }
        if let Some(v) = self.tag {
            vbox.tag = v;
        }
    }
}

pub fn execute<R: BoxRepository>(service: &BoxService<R>, args: BoxArgs) -> Result<(), CliError> {
    match args.command {
        BoxCommand::Create(fields) => {
            let mut vbox = fields.target.to_box();
            fields.apply(&mut vbox);
            print_json(&service.create_box(&vbox)?)
        }
        BoxCommand::Show(target) => print_json(&service.find_box(&target.username, &target.name)?),
        BoxCommand::List { username } => print_json(&service.list_boxes(&username)?),
        BoxCommand::Update(fields) => {
            let mut vbox = service.find_box(&fields.target.username, &fields.target.name)?;
            fields.apply(&mut vbox);
            print_json(&service.update_box(&vbox)?)
        }
        BoxCommand::Delete(target) => print_json(&service.delete_box(&target.to_box())?),
    }
}
