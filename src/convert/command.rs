//! FFmpeg command construction
//!
//! Builds one argument vector per source image:
//!
//! ```text
//! ffmpeg -hide_banner -loglevel error -i <input> -y -vf <scale> <quality args> <output>
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::job::{ConversionJob, OutputFormat, Quality};

/// Scale filter passed to `-vf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleFilter {
    /// Fixed height, width derived by ffmpeg from the source aspect ratio
    AutoWidth { height: u32 },
    /// Exact output size
    Exact { width: u32, height: u32 },
}

impl ScaleFilter {
    pub fn for_job(job: &ConversionJob) -> Self {
        match job.target_width() {
            Some(width) => ScaleFilter::Exact {
                width,
                height: job.target_height(),
            },
            None => ScaleFilter::AutoWidth {
                height: job.target_height(),
            },
        }
    }
}

impl fmt::Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleFilter::AutoWidth { height } => write!(f, "scale=-1:{}", height),
            ScaleFilter::Exact { width, height } => write!(f, "scale={}:{}", width, height),
        }
    }
}

/// Map the 1-100 quality onto the encoder's own scale.
///
/// - PNG: `-quality`, inverted so 1 → 100 and 100 → 0
/// - JPG: `-q:v` (mjpeg qscale), 1 → 31 and 100 → 1
/// - WebP: `-quality`, same unit as the user scale
pub fn quality_args(format: OutputFormat, quality: Quality) -> [String; 2] {
    let q = quality.value() as u32;
    match format {
        OutputFormat::Png => {
            let png_quality = 100 - (q - 1) * 100 / 99;
            ["-quality".to_string(), png_quality.to_string()]
        }
        OutputFormat::Jpg => {
            let qscale = 31 - (q - 1) * 30 / 99;
            ["-q:v".to_string(), qscale.to_string()]
        }
        OutputFormat::Webp => ["-quality".to_string(), q.to_string()],
    }
}

/// Output path for `input`: same stem, new extension, inside `output_dir`
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| OsString::from("output"));
    let mut file_name = stem;
    file_name.push(".");
    file_name.push(format.extension());
    output_dir.join(file_name)
}

/// A fully assembled external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegCommand {
    program: PathBuf,
    args: Vec<OsString>,
    output: PathBuf,
}

impl FfmpegCommand {
    /// Build the command converting `input` according to `job`.
    ///
    /// `output_dir` is the job's output directory already resolved against
    /// the working directory.
    pub fn build(program: &Path, job: &ConversionJob, input: &Path, output_dir: &Path) -> Self {
        let output = output_path_for(input, output_dir, job.output_format());

        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            input.as_os_str().to_os_string(),
            // Overwrite existing outputs
            "-y".into(),
            "-vf".into(),
            ScaleFilter::for_job(job).to_string().into(),
        ];
        args.extend(
            quality_args(job.output_format(), job.quality())
                .into_iter()
                .map(OsString::from),
        );
        args.push(output.as_os_str().to_os_string());

        Self {
            program: program.to_path_buf(),
            args,
            output,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Arguments as lossy UTF-8 strings, for logging and assertions
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Value following `flag`, if present
    pub fn arg_value(&self, flag: &str) -> Option<String> {
        let args = self.args_lossy();
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for FfmpegCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.args_lossy() {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
