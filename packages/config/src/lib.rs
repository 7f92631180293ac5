// ABOUTME: Deployment configuration access for the preflight checker
// ABOUTME: Key-value config file loading plus centralized env var names

pub mod constants;
pub mod deploy;

pub use deploy::{ConfigError, DeployConfig};
