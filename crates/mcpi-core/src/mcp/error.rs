//! Install failures reported back to the host.

use std::path::PathBuf;

use thiserror::Error;

/// Why an install request was not completed.
///
/// Every variant leaves the config document untouched except `Other`, which
/// may be raised by the final write itself.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Node.js is not installed, please install it!")]
    RuntimeMissing,

    #[error(
        "Python uv is not installed, please install it! Tell users to go to https://docs.astral.sh/uv/"
    )]
    PythonLauncherMissing,

    #[error("Invalid package name {0:?}: expected an npm or PyPI package name")]
    InvalidPackageName(String),

    #[error("Path {} does not exist locally!", .0.display())]
    PathNotFound(PathBuf),

    #[error("Can't figure out how to install {}: no package.json found", .0.display())]
    UnknownInstallMethod(PathBuf),

    #[error("Error installing package: {0:#}")]
    Other(#[from] anyhow::Error),
}
