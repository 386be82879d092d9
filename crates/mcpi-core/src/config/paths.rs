//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// Directory under the platform config dir where the host keeps its settings.
pub const HOST_DIR_NAME: &str = "Claude";

/// File name of the host's configuration document.
pub const CONFIG_FILE_NAME: &str = "claude_desktop_config.json";

/// Per-OS default location of the host configuration document.
///
/// - macOS: `~/Library/Application Support/Claude/claude_desktop_config.json`
/// - Windows: `%APPDATA%\Claude\claude_desktop_config.json`
/// - Linux: `$XDG_CONFIG_HOME/Claude/claude_desktop_config.json`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(config_path_in(&config_dir))
}

pub fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join(HOST_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Use the explicit path when given, otherwise the per-OS default.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/etc/host/config.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/etc/host/config.json"));
    }

    #[test]
    fn default_path_lives_under_host_dir() {
        let path = config_path_in(Path::new("/home/dev/.config"));
        assert_eq!(
            path,
            PathBuf::from("/home/dev/.config/Claude/claude_desktop_config.json")
        );
    }
}
