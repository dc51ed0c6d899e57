//! User commands

use boxstash_core::{BoxRepository, User};
use boxstash_engine::BoxService;
use clap::{Args, Subcommand};

use super::print_json;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user or organization
    Create(UserFields),
    /// Show a user with all of their boxes
    Show { username: String },
    /// Change profile fields
    Update(UserFields),
    /// Delete a user and everything they own
    Delete { username: String },
}

#[derive(Debug, Args)]
pub struct UserFields {
    pub username: String,
    #[arg(long)]
    pub avatar_url: Option<String>,
    #[arg(long)]
    pub profile_html: Option<String>,
    #[arg(long)]
    pub profile_markdown: Option<String>,
}

impl UserFields {
    fn apply(self, user: &mut User) {
        if let Some(v) = self.avatar_url {
            user.avatar_url = v;
        }
        if let Some(v) = self.profile_html {
            user.profile_html = v;
        }
        if let Some(v) = self.profile_markdown {
            user.profile_markdown = v;
        }
    }
}

pub fn execute<R: BoxRepository>(service: &BoxService<R>, args: UserArgs) -> Result<(), CliError> {
    match args.command {
        UserCommand::Create(fields) => {
            let mut user = User::new(&fields.username);
            fields.apply(&mut user);
            print_json(&service.create_user(&user)?)
        }
        UserCommand::Show { username } => print_json(&service.find_user(&username)?),
        UserCommand::Update(fields) => {
            let mut user = service.find_user(&fields.username)?;
            fields.apply(&mut user);
            print_json(&service.update_user(&user)?)
        }
        UserCommand::Delete { username } => {
            print_json(&service.delete_user(&User::new(username))?)
        }
    }
}
