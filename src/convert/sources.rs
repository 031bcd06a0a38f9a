//! Source resolution: expands the user's selection into image files

use std::path::{Path, PathBuf};

use super::error::ConvertError;
use super::job::SourceKind;

/// Input extensions ffmpeg is asked to decode (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif"];

/// Check if a path has a supported image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| e.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Files resolved from a selection, split by whether they can be converted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub images: Vec<PathBuf>,
    pub unsupported: Vec<PathBuf>,
}

impl SourceSet {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Expand a file or directory selection into the batch's source files.
///
/// Directories are listed one level deep; sub-directories are ignored.
/// Both lists come back sorted by path.
pub fn resolve_sources(path: &Path, kind: SourceKind) -> Result<SourceSet, ConvertError> {
    let mut set = SourceSet::default();

    let candidates = match kind {
        SourceKind::File => vec![path.to_path_buf()],
        SourceKind::Directory => {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(path)? {
                let entry_path = entry?.path();
                if entry_path.is_file() {
                    files.push(entry_path);
                }
            }
            files.sort();
            files
        }
    };

    for candidate in candidates {
        if is_supported_image(&candidate) {
            set.images.push(candidate);
        } else {
            set.unsupported.push(candidate);
        }
    }

    Ok(set)
}
