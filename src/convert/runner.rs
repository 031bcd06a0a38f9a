//! Batch execution of ffmpeg commands
//!
//! Each source is converted synchronously, one process at a time. A failed
//! conversion is recorded and the batch moves on to the next file.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use console::style;
use indicatif::ProgressBar;
use tracing::{debug, warn};

use super::command::FfmpegCommand;
use super::error::ConvertError;
use super::job::ConversionJob;
use super::sources::SourceSet;

/// Maximum number of stderr characters echoed per failed file
pub const STDERR_EXCERPT_LEN: usize = 100;

/// What an external process reported back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stderr: String,
}

/// Seam between command construction and process execution
pub trait CommandRunner {
    fn run(&self, command: &FfmpegCommand) -> std::io::Result<ProcessOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &FfmpegCommand) -> std::io::Result<ProcessOutput> {
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Records commands instead of running them; every command succeeds
#[derive(Debug, Default)]
pub struct DryRunner {
    commands: RefCell<Vec<FfmpegCommand>>,
}

impl DryRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<FfmpegCommand> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for DryRunner {
    fn run(&self, command: &FfmpegCommand) -> std::io::Result<ProcessOutput> {
        self.commands.borrow_mut().push(command.clone());
        Ok(ProcessOutput {
            success: true,
            exit_code: Some(0),
            stderr: String::new(),
        })
    }
}

/// Result of processing one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Converted,
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self.status, FileStatus::Converted)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, FileStatus::Skipped { .. })
    }
}

/// Per-file outcomes of a batch, in processing order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// Number of ffmpeg conversions that were attempted
    pub fn attempted(&self) -> usize {
        self.converted() + self.failed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }
}

/// First line-folded characters of a process's stderr
pub fn stderr_excerpt(stderr: &str) -> String {
    let folded = stderr.split_whitespace().collect::<Vec<_>>().join(" ");
    folded.chars().take(STDERR_EXCERPT_LEN).collect()
}

/// A job bound to a concrete binary and output directory
pub struct Batch<'a> {
    job: &'a ConversionJob,
    program: PathBuf,
    output_dir: PathBuf,
}

impl<'a> Batch<'a> {
    /// `output_dir` must already be resolved against the working directory
    pub fn new(job: &'a ConversionJob, program: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            job,
            program,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build the command for a single source image
    pub fn command_for(&self, source: &Path) -> FfmpegCommand {
        FfmpegCommand::build(&self.program, self.job, source, &self.output_dir)
    }

    /// Convert every image in `sources`, recording one outcome per file.
    ///
    /// Unsupported files are recorded as skipped. The output directory is
    /// created before the first conversion; an empty image list does nothing.
    pub fn run<R: CommandRunner + ?Sized>(
        &self,
        sources: &SourceSet,
        runner: &R,
        progress: &ProgressBar,
    ) -> Result<BatchReport, ConvertError> {
        let mut report = BatchReport::default();

        for path in &sources.unsupported {
            report.outcomes.push(FileOutcome {
                source: path.clone(),
                output: None,
                status: FileStatus::Skipped {
                    reason: "unsupported file extension".to_string(),
                },
            });
        }

        if sources.images.is_empty() {
            return Ok(report);
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            ConvertError::OutputDirectory {
                path: self.output_dir.clone(),
                source,
            }
        })?;

        progress.set_length(sources.images.len() as u64);

        for source in &sources.images {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            progress.set_message(name.clone());

            let command = self.command_for(source);
            let status = self.convert_one(source, &command, runner);

            if let FileStatus::Failed { stderr, .. } = &status {
                progress.println(format!(
                    "    {} {} {}",
                    style("✗").red().bold(),
                    name,
                    style(stderr_excerpt(stderr)).dim()
                ));
            }

            report.outcomes.push(FileOutcome {
                source: source.clone(),
                output: Some(command.output().to_path_buf()),
                status,
            });
            progress.inc(1);
        }

        Ok(report)
    }

    fn convert_one<R: CommandRunner + ?Sized>(
        &self,
        source: &Path,
        command: &FfmpegCommand,
        runner: &R,
    ) -> FileStatus {
        if same_file(source, command.output()) {
            warn!(source = %source.display(), "output path is the source file, not converting");
            return FileStatus::Failed {
                exit_code: None,
                stderr: "Output would overwrite the source file; choose another output directory or format"
                    .to_string(),
            };
        }

        debug!(command = %command, "running ffmpeg");

        match runner.run(command) {
            Ok(output) if output.success => FileStatus::Converted,
            Ok(output) => {
                warn!(
                    source = %source.display(),
                    exit_code = ?output.exit_code,
                    stderr = %stderr_excerpt(&output.stderr),
                    "conversion failed"
                );
                FileStatus::Failed {
                    exit_code: output.exit_code,
                    stderr: output.stderr,
                }
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "failed to start ffmpeg");
                FileStatus::Failed {
                    exit_code: None,
                    stderr: e.to_string(),
                }
            }
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
