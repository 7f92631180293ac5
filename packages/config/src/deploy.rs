// ABOUTME: Key-value deployment configuration file: load, typed reads, persist
// ABOUTME: Preserves unrelated lines and comments when rewriting a single key

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::POSTGRES_VERSION_KEY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

/// The deployment's key-value configuration file (`key = value` per line,
/// `#` comments). Loaded once from an explicit path and passed down; the
/// checker never reads configuration ambiently.
#[derive(Debug)]
pub struct DeployConfig {
    path: PathBuf,
    lines: Vec<String>,
}

impl DeployConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded deployment configuration");
        Ok(Self {
            path: path.to_path_buf(),
            lines: raw.lines().map(str::to_string).collect(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| {
            let line = line.trim();
            if line.starts_with('#') {
                return None;
            }
            let (k, v) = line.split_once('=')?;
            (k.trim() == key).then(|| v.trim())
        })
    }

    /// The configured Postgres major version. Absent or blank means unset
    /// and is reported as 0.
    pub fn postgres_version(&self) -> Result<u32, ConfigError> {
        match self.get(POSTGRES_VERSION_KEY) {
            None | Some("") => Ok(0),
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: POSTGRES_VERSION_KEY.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Records the observed Postgres major version, updating the existing
    /// key in place or appending it, and rewrites the file. Unrelated lines
    /// and comments are preserved verbatim.
    ///
    /// Concurrent invocations of the checker may race on this write; the
    /// configuration store (filesystem and the surrounding upgrade tooling)
    /// is required to serialize them. This crate performs a plain rewrite.
    pub fn persist_postgres_version(&mut self, major: u32) -> Result<(), ConfigError> {
        let new_line = format!("{POSTGRES_VERSION_KEY} = {major}");
        let mut replaced = false;
        for line in &mut self.lines {
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if let Some((k, _)) = trimmed.split_once('=') {
                if k.trim() == POSTGRES_VERSION_KEY {
                    *line = new_line.clone();
                    replaced = true;
                }
            }
        }
        if !replaced {
            self.lines.push(new_line);
        }

        let mut contents = self.lines.join("\n");
        contents.push('\n');
        std::fs::write(&self.path, contents).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            postgres_version = major,
            "Persisted observed Postgres version"
        );
        Ok(())
    }
}
