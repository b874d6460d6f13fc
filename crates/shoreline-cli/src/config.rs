//! Locating and reading the guide's settings file.
//!
//! `--config` names the file outright. Without it, `shoreline/config.toml`
//! under the working directory is tried, then `config.toml` in the platform
//! config directory; when neither exists the built-in defaults apply. The
//! module also decides where feedback and the visit counter are stored.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use shoreline::{ShorelineError, config::AppConfig};

const WORKING_DIR_SETTINGS: &str = "shoreline/config.toml";

/// A settings file that was named or found but could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no settings file at {0}")]
    NotFound(PathBuf),

    #[error("cannot read settings file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl From<ConfigError> for ShorelineError {
    fn from(err: ConfigError) -> Self {
        ShorelineError::Config(err.to_string())
    }
}

/// Where the settings file in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Flag,
    WorkingDir,
    Platform,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "beautyofbeaches", "shoreline")
}

/// The first settings file present on disk, if any.
fn discover() -> Option<(Origin, PathBuf)> {
    let local = PathBuf::from(WORKING_DIR_SETTINGS);
    if local.is_file() {
        return Some((Origin::WorkingDir, local));
    }

    let Some(proj_dirs) = project_dirs() else {
        debug!("Platform config directory unknown");
        return None;
    };
    let platform = proj_dirs.config_dir().join("config.toml");
    if platform.is_file() {
        return Some((Origin::Platform, platform));
    }
    debug!(path = platform.display().to_string(); "No settings in platform config directory");
    None
}

/// Loads the guide's settings.
///
/// # Errors
///
/// Returns `ShorelineError::Config` when the `--config` file is missing, or
/// when the chosen file cannot be read or holds invalid settings.
pub fn load_config(explicit: Option<impl AsRef<Path>>) -> Result<AppConfig, ShorelineError> {
    let found = match explicit {
        Some(path) => {
            let path = path.as_ref();
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some((Origin::Flag, path.to_path_buf()))
        }
        None => discover(),
    };

    let Some((origin, path)) = found else {
        debug!("No settings file, using built-in defaults");
        return Ok(AppConfig::default());
    };
    info!(path = path.display().to_string(), origin:?; "Reading settings");
    Ok(read_settings(&path)?)
}

fn read_settings(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory for persisted values.
///
/// The configured directory wins; otherwise the platform data directory, or
/// `.shoreline` in the working directory when the platform has none.
pub fn data_dir(config: &AppConfig) -> PathBuf {
    if let Some(dir) = config.storage().dir() {
        return dir.clone();
    }
    match project_dirs() {
        Some(proj_dirs) => proj_dirs.data_dir().to_path_buf(),
        None => {
            debug!("Platform data directory unknown, using .shoreline");
            PathBuf::from(".shoreline")
        }
    }
}
