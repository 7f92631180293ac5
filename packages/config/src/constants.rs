// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across preflight

// File Locations
pub const PREFLIGHT_CONFIG_PATH: &str = "PREFLIGHT_CONFIG_PATH";
pub const PREFLIGHT_MANIFEST_PATH: &str = "PREFLIGHT_MANIFEST_PATH";

// Database Configuration
pub const PREFLIGHT_DATABASE_URL: &str = "PREFLIGHT_DATABASE_URL";
pub const DATABASE_URL: &str = "DATABASE_URL"; // Legacy

// Configuration File Keys
pub const POSTGRES_VERSION_KEY: &str = "postgres_version";
