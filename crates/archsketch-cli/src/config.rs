//! Configuration discovery for the CLI.
//!
//! Finds the TOML file that feeds [`AppConfig`] and reports which location it
//! came from.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use archsketch::{ArchsketchError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ArchsketchError {
    fn from(err: ConfigError) -> Self {
        ArchsketchError::Config(err.to_string())
    }
}

/// Path of the project-local configuration, relative to the working directory.
const LOCAL_CONFIG: &str = "archsketch/config.toml";

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Passed with `--config`; it must exist.
    Explicit,
    Local,
    Platform,
}

impl ConfigSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Local => "local",
            Self::Platform => "platform",
        }
    }
}

/// Loads the configuration, falling back to [`AppConfig::default`] when no
/// file is found.
///
/// An explicit path wins. Otherwise `archsketch/config.toml` in the working
/// directory is tried, then `config.toml` in the platform config directory.
///
/// # Errors
///
/// Returns `ArchsketchError::Config` if the explicit file is missing or the
/// chosen file is not valid TOML for [`AppConfig`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ArchsketchError> {
    let explicit = explicit_path.as_ref().map(AsRef::<Path>::as_ref);
    let platform = ProjectDirs::from("com", "archsketch", "archsketch")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    if platform.is_none() {
        debug!("Could not determine platform-specific config directory");
    }

    match find_config(explicit, Path::new(LOCAL_CONFIG), platform.as_deref()) {
        Some((source, path)) => {
            info!(source = source.as_str(), path = path.display().to_string(); "Loading configuration");
            read_config(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Picks the configuration file to load. An explicit path is returned even
/// when it does not exist, so that reading it reports the missing file.
fn find_config(
    explicit: Option<&Path>,
    local: &Path,
    platform: Option<&Path>,
) -> Option<(ConfigSource, PathBuf)> {
    if let Some(path) = explicit {
        return Some((ConfigSource::Explicit, path.to_path_buf()));
    }

    [(ConfigSource::Local, Some(local)), (ConfigSource::Platform, platform)]
        .into_iter()
        .filter_map(|(source, path)| path.map(|path| (source, path)))
        .find(|(source, path)| {
            let found = path.is_file();
            if !found {
                debug!(source = source.as_str(), path = path.display().to_string(); "Configuration file not found");
            }
            found
        })
        .map(|(source, path)| (source, path.to_path_buf()))
}

fn read_config(path: &Path) -> Result<AppConfig, ArchsketchError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()).into())
}
