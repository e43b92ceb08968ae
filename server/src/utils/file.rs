//! File path helpers

use std::path::PathBuf;

/// Expand `~` and make relative paths absolute against the working directory
///
/// ```ignore
/// expand_path("~/.tdjobs")   // -> /home/user/.tdjobs
/// expand_path("./conf.json") // -> /current/dir/conf.json
/// expand_path("/etc/config") // -> /etc/config
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
