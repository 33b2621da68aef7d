use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};

const CONFIG_PATH_ENV_VAR: &str = "CALGRID_CONFIG_FILE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export_dir: Option<PathBuf>,
    pub dim_adjacent: bool,
    pub today_char: Option<char>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            export_dir: None,
            dim_adjacent: true,
            today_char: Some('*'),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|err| {
            let msg = format!("{}: {}", path.display(), err.message.as_deref().unwrap_or(""));
            err.with_msg(&msg)
        })
    }

    /// Directory exports land in when none is given on the command line.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        locations.push([dir.as_str(), "calgrid", "config.toml"].iter().collect());
    } else if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calgrid.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first existing file out of
/// [`find_configfile_locations`]. Falls back to the default config when no
/// file exists at all.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::new(
                ErrorKind::IOError(std::io::ErrorKind::NotFound.into()),
                &format!("config file {} not found", path.display()),
            ));
        }
        return Config::from_file(path);
    }

    for candidate in find_configfile_locations() {
        if candidate.is_file() {
            log::debug!("Using config file {}", candidate.display());
            return Config::from_file(&candidate);
        }
        log::trace!("No config at {}", candidate.display());
    }

    log::debug!("No config file found, using defaults");
    Ok(Config::default())
}
