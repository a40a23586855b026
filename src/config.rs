//! Home directory, repository list, and alias configuration.
//!
//! Settings come from the environment plus an optional `config.json` in the
//! packgen home; nothing here touches pack contents.
use crate::detect::LanguageAliases;
use crate::error::PackError;
use crate::repository::{discover_repositories, Repository};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Overrides the packgen home directory.
pub const HOME_ENV: &str = "PACKGEN_HOME";
/// Platform path list of repository roots, replacing discovery when set.
pub const REPOSITORIES_ENV: &str = "PACKGEN_REPOSITORIES";

const CONFIG_FILE_NAME: &str = "config.json";

/// Optional user configuration stored at `<home>/config.json`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Extra repository roots, searched after the default ones.
    #[serde(default)]
    pub repositories: Vec<PathBuf>,
    /// Detected-language → pack-name aliases layered over the built-ins.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Resolved runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub home: PathBuf,
    pub repositories: Vec<Repository>,
    pub aliases: LanguageAliases,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        let home = match env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            Some(home) => PathBuf::from(home),
            None => default_home()?,
        };
        let repositories = env::var_os(REPOSITORIES_ENV).filter(|value| !value.is_empty());
        Self::load(home, repositories).map_err(anyhow::Error::from)
    }

    /// Build settings for `home`, using an explicit repository path list when
    /// given and discovering repositories under `<home>/packs` otherwise.
    pub fn load(home: PathBuf, repositories: Option<OsString>) -> Result<Self, PackError> {
        let config = load_config_file(&home)?;
        let mut resolved: Vec<Repository> = match repositories {
            Some(list) => env::split_paths(&list).map(Repository::new).collect(),
            None => discover_repositories(&packs_home(&home)),
        };
        resolved.extend(
            config
                .repositories
                .into_iter()
                .map(|root| Repository::new(resolve_against(&home, root))),
        );
        let mut aliases = LanguageAliases::default();
        aliases.extend(config.aliases);
        tracing::debug!(
            home = %home.display(),
            repositories = resolved.len(),
            "loaded settings"
        );
        Ok(Self {
            home,
            repositories: resolved,
            aliases,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE_NAME)
    }
}

/// `<home>/packs`, where installed repositories live.
pub fn packs_home(home: &Path) -> PathBuf {
    home.join("packs")
}

fn default_home() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|dir| dir.join(".packgen"))
        .ok_or_else(|| anyhow!("cannot locate a home directory; set {HOME_ENV}"))
}

fn resolve_against(home: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        home.join(path)
    } else {
        path
    }
}

/// Read `<home>/config.json`; a missing file means defaults.
pub fn load_config_file(home: &Path) -> Result<ConfigFile, PackError> {
    let path = home.join(CONFIG_FILE_NAME);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(err) => {
            return Err(PackError::Config {
                path,
                message: err.to_string(),
            })
        }
    };
    serde_json::from_slice(&bytes).map_err(|err| PackError::Config {
        path,
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
