//! Path utilities for Recall
//!
//! Resolves the app root (logs, fallback `.env`) and expands `~`.

use std::path::PathBuf;

/// Expands a leading tilde (~) to the user's home directory.
/// "~/.recall" -> "/home/me/.recall"
/// "/tmp/foo" -> "/tmp/foo" (no change)
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            format!("{}/{}", home, rest)
        }
        None => path.to_string(),
    }
}

pub fn get_path(path: &str) -> PathBuf {
    PathBuf::from(expand_tilde(path))
}

/// Resolves the Recall root from RECALL_ROOT.
/// Absolute paths are used as-is, `~` is expanded and bare names land under $HOME.
pub fn get_app_root() -> PathBuf {
    let root_name = std::env::var("RECALL_ROOT").unwrap_or_else(|_| ".recall".to_string());
    resolve_root(&root_name)
}

fn resolve_root(root_name: &str) -> PathBuf {
    if root_name.starts_with('/') {
        PathBuf::from(root_name)
    } else if root_name.starts_with('~') {
        get_path(root_name)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(root_name)
    }
}
