//! Conversion job definition and validation
//!
//! The prompt flow fills in a [`JobRequest`]; [`ConversionJob::try_from`]
//! checks it and produces the read-only job the runner consumes.

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::ConvertError;

/// Whether the selected source is a single image or a directory of images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Directory,
}

/// Image formats the wizard can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpg,
    Webp,
}

impl OutputFormat {
    /// Every supported output format, in menu order
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Jpg, OutputFormat::Webp];

    /// File extension written for this format (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }

    /// Human-readable label shown in menus and summaries
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpg => "JPG",
            OutputFormat::Webp => "WebP",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output quality on the user-facing 1-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;
    pub const DEFAULT: Quality = Quality(75);

    pub fn new(value: u32) -> Result<Self, ConvertError> {
        if (Self::MIN as u32..=Self::MAX as u32).contains(&value) {
            Ok(Quality(value as u8))
        } else {
            Err(ConvertError::invalid_job(
                "quality",
                format!(
                    "must be between {} and {}, got {}",
                    Self::MIN,
                    Self::MAX,
                    value
                ),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated job parameters as collected by the prompt flow
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub source_path: PathBuf,
    pub source_kind: SourceKind,
    pub keep_aspect_ratio: bool,
    pub target_width: Option<u32>,
    pub target_height: u32,
    pub output_format: OutputFormat,
    pub quality: u32,
    pub output_directory: PathBuf,
}

/// Validated, immutable conversion parameters for one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    source_path: PathBuf,
    source_kind: SourceKind,
    keep_aspect_ratio: bool,
    target_width: Option<u32>,
    target_height: u32,
    output_format: OutputFormat,
    quality: Quality,
    output_directory: PathBuf,
}

impl TryFrom<JobRequest> for ConversionJob {
    type Error = ConvertError;

    fn try_from(request: JobRequest) -> Result<Self, Self::Error> {
        if request.target_height == 0 {
            return Err(ConvertError::invalid_job(
                "height",
                "must be a positive number of pixels",
            ));
        }

        // Width is only meaningful when the aspect ratio is not preserved
        let target_width = if request.keep_aspect_ratio {
            None
        } else {
            match request.target_width {
                Some(0) => {
                    return Err(ConvertError::invalid_job(
                        "width",
                        "must be a positive number of pixels",
                    ))
                }
                Some(width) => Some(width),
                None => {
                    return Err(ConvertError::invalid_job(
                        "width",
                        "is required when the aspect ratio is not kept",
                    ))
                }
            }
        };

        if request.output_directory.as_os_str().is_empty() {
            return Err(ConvertError::invalid_job(
                "output directory",
                "must not be empty",
            ));
        }

        Ok(Self {
            source_path: request.source_path,
            source_kind: request.source_kind,
            keep_aspect_ratio: request.keep_aspect_ratio,
            target_width,
            target_height: request.target_height,
            output_format: request.output_format,
            quality: Quality::new(request.quality)?,
            output_directory: request.output_directory,
        })
    }
}

impl ConversionJob {
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn is_directory(&self) -> bool {
        self.source_kind == SourceKind::Directory
    }

    pub fn keep_aspect_ratio(&self) -> bool {
        self.keep_aspect_ratio
    }

    pub fn target_width(&self) -> Option<u32> {
        self.target_width
    }

    pub fn target_height(&self) -> u32 {
        self.target_height
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Dimensions formatted for display, e.g. `640 x 480` or `auto x 480`
    pub fn dimensions_label(&self) -> String {
        match self.target_width {
            Some(width) => format!("{} x {}", width, self.target_height),
            None => format!("auto x {}", self.target_height),
        }
    }
}
