//! ffwizard: Interactive FFmpeg Image Conversion CLI
//!
//! Asks which images to convert and how, then runs one `ffmpeg` process
//! per image and summarizes the results.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ffwizard::cli::{run_wizard, Cli, WizardResult};
use ffwizard::convert::{resolve_sources, Batch, DryRunner, Environment, SystemRunner};
use ffwizard::report::BatchSummary;
use ffwizard::utils::{
    create_progress_bar, finish_with_success, finish_with_warning, print_banner,
    print_completion, print_info, print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    print_banner(env!("CARGO_PKG_VERSION"));

    // The binary must exist before any conversion prompt is shown
    let env = Environment::from_process(&cli.ffmpeg)?;
    let program = env.locate_ffmpeg()?;
    info!(ffmpeg = %program.display(), "located ffmpeg");

    let job = match run_wizard(&env)? {
        WizardResult::Run(job) => job,
        WizardResult::Cancelled(reason) => {
            print_info(reason);
            return Ok(());
        }
    };

    let source = env.resolve(job.source_path());
    let sources = resolve_sources(&source, job.source_kind())
        .with_context(|| format!("Failed to read source: {}", source.display()))?;
    info!(
        images = sources.images.len(),
        unsupported = sources.unsupported.len(),
        "resolved sources"
    );

    for path in &sources.unsupported {
        print_warning(&format!(
            "Skipping unsupported file: {}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        ));
    }

    if sources.is_empty() {
        print_info("No image files found to convert.");
        return Ok(());
    }

    let batch = Batch::new(&job, program, env.resolve(job.output_directory()));

    print_step_header(&format!("Converting {} image(s)", sources.images.len()));
    let pb = create_progress_bar(sources.images.len() as u64, "Converting");

    let report = if cli.dry_run {
        let runner = DryRunner::new();
        let report = batch.run(&sources, &runner, &pb)?;
        pb.finish_and_clear();
        for command in runner.commands() {
            println!("    {}", command);
        }
        report
    } else {
        let report = batch.run(&sources, &SystemRunner, &pb)?;
        if report.failed() == 0 {
            finish_with_success(&pb, "All conversions finished");
        } else {
            finish_with_warning(
                &pb,
                &format!(
                    "{} of {} conversion(s) failed",
                    report.failed(),
                    report.attempted()
                ),
            );
        }
        report
    };

    BatchSummary::new(&report).display();

    if report.converted() > 0 {
        print_success(&format!(
            "Output written to {}",
            batch.output_dir().display()
        ));
    }
    print_completion();

    Ok(())
}

/// Route tracing output to stderr; RUST_LOG overrides the -v level
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
