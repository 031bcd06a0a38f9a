//! CLI module - argument parsing, interactive prompts and the file browser

mod args;
pub mod browser;
mod prompts;
pub mod wizard;

pub use args::Cli;
pub use browser::{run_file_browser, BrowseResult};
pub use prompts::*;
pub use wizard::{run_wizard, WizardResult};
