use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::defaults::TrackerConfig;

pub const ENV_PREFIX: &str = "BTC_TRACKER";

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Load the configuration file at `path`, creating it from the embedded
/// defaults when missing, with `BTC_TRACKER_*` environment variables on top.
pub fn load_configuration(path: &Path) -> Result<Config> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    Config::builder()
        .add_source(config::File::with_name(filename).format(config::FileFormat::Toml))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Could not build config")
}

/// Extract the `[tracker]` table, falling back to defaults when it is absent.
pub fn tracker_config(cfg: &Config) -> Result<TrackerConfig> {
    match cfg.get::<TrackerConfig>(TrackerConfig::main_key_prefix()) {
        Ok(tracker) => Ok(tracker),
        Err(config::ConfigError::NotFound(_)) => Ok(TrackerConfig::default()),
        Err(e) => Err(e).context("Invalid tracker configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}
