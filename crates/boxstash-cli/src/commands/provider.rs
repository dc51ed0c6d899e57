//! Provider commands

use boxstash_core::{BoxRepository, Provider};
use boxstash_engine::BoxService;
use clap::{Args, Subcommand};

use super::{print_json, VersionRef};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct ProviderArgs {
    #[command(subcommand)]
    pub command: ProviderCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProviderCommand {
    /// Add a provider to a version
    Create(ProviderFields),
    /// Show one provider
    Show(ProviderRef),
    /// List the providers of a version
    List(VersionRef),
    /// Change provider fields
    Update(ProviderFields),
    /// Delete one provider
    Delete(ProviderRef),
}

#[derive(Debug, Clone, Args)]
pub struct ProviderRef {
    #[command(flatten)]
    pub version: VersionRef,
    /// Provider name, e.g. virtualbox
    pub provider: String,
}

impl ProviderRef {
    fn to_provider(&self) -> Provider {
        Provider::new(&self.provider)
    }
}

#[derive(Debug, Args)]
pub struct ProviderFields {
    #[command(flatten)]
    pub target: ProviderRef,
    /// Where the box file can be downloaded from
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub hosted: Option<bool>,
}

impl ProviderFields {
    fn apply(self, provider: &mut Provider) {
        if let Some(v) = self.url {
            provider.original_url = v.clone();
            provider.download_url = v;
        }
        if let Some(v) = self.hosted {
            provider.hosted = v;
        }
    }
}

pub fn execute<R: BoxRepository>(
    service: &BoxService<R>,
    args: ProviderArgs,
) -> Result<(), CliError> {
    match args.command {
        ProviderCommand::Create(fields) => {
            let vbox = fields.target.version.vbox.to_box();
            let version = fields.target.version.to_version();
            let mut provider = fields.target.to_provider();
            fields.apply(&mut provider);
            print_json(&service.create_provider(&vbox, &version, &provider)?)
        }
        ProviderCommand::Show(target) => print_json(&service.find_provider(
            &target.version.vbox.to_box(),
            &target.version.to_version(),
            &target.to_provider(),
        )?),
        ProviderCommand::List(target) => {
            print_json(&service.list_providers(&target.vbox.to_box(), &target.to_version())?)
        }
        ProviderCommand::Update(fields) => {
            let vbox = fields.target.version.vbox.to_box();
            let version = fields.target.version.to_version();
            let mut provider =
                service.find_provider(&vbox, &version, &fields.target.to_provider())?;
            fields.apply(&mut provider);
            print_json(&service.update_provider(&vbox, &version, &provider)?)
        }
        ProviderCommand::Delete(target) => print_json(&service.delete_provider(
            &target.version.vbox.to_box(),
            &target.version.to_version(),
            &target.to_provider(),
        )?),
    }
}
