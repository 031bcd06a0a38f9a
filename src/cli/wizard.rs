//! Step-by-step conversion wizard
//!
//! Walks the user through source selection, sizing, format, quality and
//! output directory, shows a summary card and asks for confirmation.

use anyhow::Result;

use super::browser::{run_file_browser, BrowseResult};
use super::prompts::{
    ask_dimension, ask_keep_aspect_ratio, ask_output_directory, ask_quality, confirm_step,
    select_directory, select_format, select_source_kind,
};
use crate::convert::{ConversionJob, Environment, JobRequest, SourceKind};
use crate::utils::print_job_card;

/// Outcome of the wizard
#[derive(Debug, Clone)]
pub enum WizardResult {
    /// User confirmed a job
    Run(Box<ConversionJob>),
    /// User backed out; the message explains where
    Cancelled(&'static str),
}

/// Run the full prompt sequence against the given environment
pub fn run_wizard(env: &Environment) -> Result<WizardResult> {
    let Some(source_kind) = select_source_kind()? else {
        return Ok(WizardResult::Cancelled("No selection made."));
    };

    let source_path = match source_kind {
        SourceKind::File => match run_file_browser(&env.cwd)? {
            BrowseResult::Selected(path) => path,
            BrowseResult::Cancelled => {
                return Ok(WizardResult::Cancelled("No file selected."));
            }
        },
        SourceKind::Directory => match select_directory(&env.cwd)? {
            Some(path) => path,
            None => {
                return Ok(WizardResult::Cancelled(
                    "No directory selected (or none found in the current directory).",
                ));
            }
        },
    };

    let keep_aspect_ratio = ask_keep_aspect_ratio()?;
    let target_height = ask_dimension("height")?;
    let target_width = if keep_aspect_ratio {
        None
    } else {
        Some(ask_dimension("width")?)
    };

    let Some(output_format) = select_format()? else {
        return Ok(WizardResult::Cancelled("No output format selected."));
    };
    let quality = ask_quality()?;
    let output_directory = ask_output_directory()?;

    let job = ConversionJob::try_from(JobRequest {
        source_path,
        source_kind,
        keep_aspect_ratio,
        target_width,
        target_height,
        output_format,
        quality,
        output_directory,
    })?;

    print_job_card(&job, &env.cwd);

    if !confirm_step("Proceed with conversion?")? {
        return Ok(WizardResult::Cancelled("Conversion cancelled."));
    }

    Ok(WizardResult::Run(Box::new(job)))
}
