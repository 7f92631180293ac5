// ABOUTME: Two-part migration identifier shared across the checker
// ABOUTME: Identity is the (app, name) pair; ordering is app then name

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifies one migration: the app (logical component) that owns it and
/// its name within that app. Names conventionally start with a numeric
/// sequence prefix (`0001_initial`) but nothing here requires that.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MigrationId {
    pub app: String,
    pub name: String,
}

impl MigrationId {
    pub fn new(app: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app, self.name)
    }
}

#[derive(Debug, Error)]
pub enum ParseMigrationIdError {
    #[error("Invalid migration id '{0}': expected '<app>.<name>'")]
    MissingSeparator(String),
    #[error("Invalid migration id '{0}': app and name must be non-empty")]
    EmptyPart(String),
}

impl FromStr for MigrationId {
    type Err = ParseMigrationIdError;

    /// Parses the `app.name` display form. Only the first dot separates;
    /// migration names may themselves contain dots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (app, name) = s
            .split_once('.')
            .ok_or_else(|| ParseMigrationIdError::MissingSeparator(s.to_string()))?;
        if app.is_empty() || name.is_empty() {
            return Err(ParseMigrationIdError::EmptyPart(s.to_string()));
        }
        Ok(Self::new(app, name))
    }
}
