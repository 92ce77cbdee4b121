//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};

use ft_core::{Config, ConfigFile};

/// Loads and validates configuration, optionally from a specific file.
///
/// Sources, later ones winning: the platform config file, `config_path`,
/// then `FT_*` environment variables.
pub fn load_from(config_path: Option<&Path>) -> Result<Config> {
    load_with_default(dirs_config_path().as_deref(), config_path)
}

fn load_with_default(default_path: Option<&Path>, config_path: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::new();

    // Load from default config location
    if let Some(path) = default_path {
        figment = figment.merge(Toml::file(path));
    }

    // Load from specified config file
    if let Some(path) = config_path {
        if !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    // Load from environment variables (FT_*)
    figment = figment.merge(Env::prefixed("FT_"));

    let file: ConfigFile = figment
        .extract()
        .context("failed to read configuration")?;
    Config::try_from(file).context("invalid configuration")
}

/// Returns the platform-specific config file for ft.
///
/// On Linux: `~/.config/flextime/config.toml`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("flextime").join("config.toml"))
}
