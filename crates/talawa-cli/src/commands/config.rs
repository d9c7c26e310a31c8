//! Config subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use talawa_core::ApiUrl;

use crate::config::{self, StoredConfig};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Store a setting
    Set {
        key: ConfigKey,
        value: String,
    },

    /// Display the stored settings
    Show,

    /// Remove all stored settings
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKey {
    /// GraphQL endpoint or snapshot directory
    ApiUrl,
    /// Bearer token
    Token,
}

pub async fn handle(cmd: ConfigCommand) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Set { key, value } => set(key, value),
        ConfigSubcommand::Show => show(),
        ConfigSubcommand::Clear => clear(),
    }
}

fn set(key: ConfigKey, value: String) -> Result<()> {
    let mut stored = config::load()?;

    match key {
        ConfigKey::ApiUrl => {
            let url = ApiUrl::new(&value).context("Invalid API URL")?;
            stored.api_url = Some(url.to_string());
            config::save(&stored)?;
            output::success(&format!("API URL set to {}", url));
        }
        ConfigKey::Token => {
            stored.token = Some(value);
            config::save(&stored)?;
            output::success("Token stored");
        }
    }

    Ok(())
}

fn show() -> Result<()> {
    let StoredConfig { api_url, token } = config::load()?;

    output::field("Config", &config::config_path()?.display().to_string());
    output::field("API URL", api_url.as_deref().unwrap_or("(not set)"));
    output::field("Token", if token.is_some() { "(set)" } else { "(not set)" });

    Ok(())
}

fn clear() -> Result<()> {
    if config::clear()? {
        output::success("Config cleared");
    } else {
        output::note("No stored config.");
    }
    Ok(())
}
