//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host directory Zellij was started from.
const HOST_ROOT: &str = "/host";

/// Returns the plugin data directory, `/host/.local/share/zellij/hn-search`.
///
/// `/host` is the cwd of the last focused terminal, or the folder Zellij was
/// started in, so this is usually `~/.local/share/zellij/hn-search`. Holds
/// the trace files.
///
/// ```
/// use hn_search::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/hn-search"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("hn-search")
}

/// Maps `~` and `~/...` to their sandbox location under `/host`.
///
/// ```
/// use hn_search::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
