//! Fallback lookup of the configuration file.

use std::fs::File;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

pub const CONFIG_FILE_NAME: &str = "peerlan.toml";
const PROJECT_QUALIFIER: &str = "org";
const PROJECT_ORGANIZATION: &str = "peerlan";
const PROJECT_APPLICATION: &str = "peerlan";

/// Candidate locations, per-user first, then system-wide.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dirs) = ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION)
    {
        candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    if let Some(system) = system_config_file() {
        candidates.push(system);
    }
    candidates
}

#[cfg(unix)]
fn system_config_file() -> Option<PathBuf> {
    Some(Path::new("/etc").join(PROJECT_APPLICATION).join(CONFIG_FILE_NAME))
}

#[cfg(not(unix))]
fn system_config_file() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
}

/// Returns the first candidate that is a file we can open.
///
/// Only existence and readability are checked; the content is left to the
/// caller.
pub fn discover(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|candidate| is_readable_file(candidate))
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}
