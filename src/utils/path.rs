//! Path utilities for user-supplied file arguments.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `expand_tilde` as an owned string, for arguments passed on to SQLite or export.
pub fn expand_arg(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}
