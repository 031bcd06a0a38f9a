//! Process-wide context: working directory, PATH and the ffmpeg binary name

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::error::ConvertError;

/// Default name of the external conversion binary
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Explicit view of the process environment the wizard depends on.
///
/// Nothing in the conversion code reads the working directory or `PATH`
/// directly; it goes through this value so tests can supply their own.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directory that relative source and output paths resolve against
    pub cwd: PathBuf,
    /// Search path used to locate the binary (`None` searches nothing)
    pub path_var: Option<OsString>,
    /// Binary name or path of ffmpeg
    pub ffmpeg: String,
}

impl Environment {
    /// Capture the current process environment
    pub fn from_process(ffmpeg: &str) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        Ok(Self {
            cwd,
            path_var: std::env::var_os("PATH"),
            ffmpeg: ffmpeg.to_string(),
        })
    }

    /// Resolve `path` against the working directory when it is relative
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Locate the ffmpeg binary, failing with `MissingDependency` if absent
    pub fn locate_ffmpeg(&self) -> Result<PathBuf, ConvertError> {
        which::which_in(&self.ffmpeg, self.path_var.as_ref(), &self.cwd).map_err(|_| {
            ConvertError::MissingDependency {
                binary: self.ffmpeg.clone(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_in(dir: &Path, path_var: Option<OsString>, ffmpeg: &str) -> Environment {
        Environment {
            cwd: dir.to_path_buf(),
            path_var,
            ffmpeg: ffmpeg.to_string(),
        }
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let env = env_in(Path::new("/work"), None, DEFAULT_FFMPEG);
        assert_eq!(env.resolve(Path::new("imgs")), PathBuf::from("/work/imgs"));
        assert_eq!(env.resolve(Path::new("/abs/imgs")), PathBuf::from("/abs/imgs"));
    }

    #[test]
    fn test_missing_binary_on_empty_path() {
        let temp_dir = TempDir::new().unwrap();
        let env = env_in(
            temp_dir.path(),
            Some(temp_dir.path().as_os_str().to_owned()),
            "ffmpeg-definitely-not-installed",
        );
        let err = env.locate_ffmpeg().unwrap_err();
        assert!(matches!(err, ConvertError::MissingDependency { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_locates_executable_in_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let bin = temp_dir.path().join("fake-ffmpeg");
        std::fs::write(&bin, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let env = env_in(
            temp_dir.path(),
            Some(temp_dir.path().as_os_str().to_owned()),
            "fake-ffmpeg",
        );
        assert_eq!(env.locate_ffmpeg().unwrap(), bin);
    }
}
