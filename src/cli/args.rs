//! Command-line argument definitions using clap
//!
//! Conversion parameters are always collected interactively; the flags here
//! only describe the environment the wizard runs in.

use clap::Parser;

use crate::convert::DEFAULT_FFMPEG;

/// ffwizard - Batch-convert images with FFmpeg through an interactive wizard
#[derive(Parser, Debug)]
#[command(name = "ffwizard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// FFmpeg binary to use (name looked up on PATH, or a path)
    #[arg(long, default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: String,

    /// Print the ffmpeg commands instead of running them.
    /// The output directory is still created.
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Increase diagnostic logging on stderr (-v info, -vv debug).
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default tracing filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "info",
            _ => "debug",
        }
    }
}
