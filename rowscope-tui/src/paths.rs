//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "rowscope";
const APPLICATION: &str = "rowscope";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Grid configuration file.
///
/// - Linux: `$XDG_CONFIG_HOME/rowscope/config.json` or `~/.config/rowscope/config.json`
/// - macOS: `~/Library/Application Support/dev.rowscope.rowscope/config.json`
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Log file of the latest session.
///
/// - Linux: `$XDG_CACHE_HOME/rowscope/latest.log` or `~/.cache/rowscope/latest.log`
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("latest.log"))
}
