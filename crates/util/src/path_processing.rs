use std::{env, path::PathBuf};

use dirs_next::home_dir;

/// Expands a leading `~` (alone, or followed by `/` or `\`) to the user's
/// home directory. Other paths are returned trimmed but otherwise untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let Some(rest) = trimmed.strip_prefix('~') else {
        return PathBuf::from(trimmed);
    };
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if rest.is_empty() {
        return home();
    }
    match rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Some(relative) => home().join(relative),
        // `~user/...` is not expanded
        None => PathBuf::from(trimmed),
    }
}

/// Reads a path override from `variable`, ignoring unset or blank values.
pub fn config_path_from_env(variable: &str) -> Option<PathBuf> {
    let value = env::var(variable).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(expand_tilde(&value))
}
