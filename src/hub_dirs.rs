//! Centralized application directory paths for ResourceHub.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! # Environment Overrides
//!
//! - `RESOURCEHUB_DATA_DIR` — overrides [`data_dir`]
//! - `RESOURCEHUB_CONFIG_DIR` — overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory, home of the usage ledger.
///
/// Resolves to `dirs::data_dir()/resourcehub/` by default.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("RESOURCEHUB_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("resourcehub"))
        .unwrap_or_else(|| PathBuf::from("/tmp/resourcehub-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/resourcehub/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("RESOURCEHUB_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("resourcehub"))
        .unwrap_or_else(|| PathBuf::from("/tmp/resourcehub-config"))
}

/// Default config file (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Usage ledger file (`data_dir()/usage.json`).
#[must_use]
pub fn usage_file() -> PathBuf {
    data_dir().join("usage.json")
}
