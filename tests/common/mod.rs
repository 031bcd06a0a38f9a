//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ffwizard::convert::{ConversionJob, JobRequest, OutputFormat, SourceKind};
use tempfile::TempDir;

/// Create a temporary directory containing the named files (small dummy content)
pub fn create_source_dir(files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in files {
        std::fs::write(temp_dir.path().join(name), b"not really an image").unwrap();
    }
    temp_dir
}

/// Build a validated job converting a whole directory
pub fn directory_job(
    source: &Path,
    format: OutputFormat,
    quality: u32,
    output_directory: &Path,
) -> ConversionJob {
    ConversionJob::try_from(JobRequest {
        source_path: source.to_path_buf(),
        source_kind: SourceKind::Directory,
        keep_aspect_ratio: true,
        target_width: None,
        target_height: 480,
        output_format: format,
        quality,
        output_directory: output_directory.to_path_buf(),
    })
    .unwrap()
}

/// Build a validated single-file job with explicit sizing
pub fn file_job(
    source: &Path,
    keep_aspect_ratio: bool,
    target_width: Option<u32>,
    target_height: u32,
    format: OutputFormat,
    quality: u32,
) -> ConversionJob {
    ConversionJob::try_from(JobRequest {
        source_path: source.to_path_buf(),
        source_kind: SourceKind::File,
        keep_aspect_ratio,
        target_width,
        target_height,
        output_format: format,
        quality,
        output_directory: PathBuf::from("out"),
    })
    .unwrap()
}

/// Write an executable shell script standing in for ffmpeg.
///
/// The script writes its last argument (the output path) and exits 0, or
/// prints `stderr` and exits with `exit_code` when that is non-zero.
#[cfg(unix)]
pub fn write_fake_ffmpeg(dir: &Path, name: &str, exit_code: i32, stderr: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = if exit_code == 0 {
        "#!/bin/sh\nfor last; do :; done\nprintf 'converted' > \"$last\"\nexit 0\n".to_string()
    } else {
        format!("#!/bin/sh\necho '{}' >&2\nexit {}\n", stderr, exit_code)
    };

    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Sorted file names in a directory
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
