//! Stored endpoint and token.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use talawa_core::ApiUrl;

use crate::cli::ConnectionArgs;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Settings persisted by `talawa config set`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Connection settings after merging flags, environment and the stored file.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub api_url: ApiUrl,
    pub token: Option<String>,
    pub timeout: Option<u64>,
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "talawa").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("config.json"))
}

/// Save the config to disk.
pub fn save(config: &StoredConfig) -> Result<()> {
    let path = config_path()?;
    let json = serde_json::to_string_pretty(config)?;

    write_private(&path, &json).context("Failed to write config file")
}

/// Write `contents` to a file readable only by its owner.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path)?;

    // The mode above only applies to newly created files
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

/// Load the config from disk, or the empty config if none is stored.
pub fn load() -> Result<StoredConfig> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(StoredConfig::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    serde_json::from_str(&json).context("Invalid config file")
}

/// Remove the stored config. Returns whether a file existed.
pub fn clear() -> Result<bool> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove config file")?;
    Ok(true)
}

/// Merge command-line connection args over the stored config.
pub fn resolve(args: &ConnectionArgs) -> Result<Resolved> {
    let stored = load()?;

    let api_url = args
        .api_url
        .clone()
        .or(stored.api_url)
        .context("No API endpoint configured. Pass --api-url or run 'talawa config set --api-url <URL>'.")?;
    let api_url = ApiUrl::new(&api_url).context("Invalid API URL")?;

    Ok(Resolved {
        api_url,
        token: args.token.clone().or(stored.token),
        timeout: args.timeout,
    })
}
