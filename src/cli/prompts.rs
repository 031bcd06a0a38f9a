//! Interactive prompts using dialoguer

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::convert::{OutputFormat, Quality, SourceKind};

/// Default output directory offered to the user
pub const DEFAULT_OUTPUT_DIR: &str = "out/";

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Ask whether to convert a single file or a whole directory.
/// Returns `None` when the user dismisses the menu.
pub fn select_source_kind() -> Result<Option<SourceKind>> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What would you like to convert?")
        .items(&["Single file", "Directory"])
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| match i {
        0 => SourceKind::File,
        _ => SourceKind::Directory,
    }))
}

/// Pick one of the visible sub-directories of `cwd`.
/// Returns `Ok(None)` when there is nothing to pick or the menu is dismissed.
pub fn select_directory(cwd: &Path) -> Result<Option<PathBuf>> {
    let directories = list_subdirectories(cwd);
    if directories.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = directories
        .iter()
        .map(|d| {
            let name = d
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{}/", name)
        })
        .collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a directory")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| directories[i].clone()))
}

/// Non-hidden sub-directories of `dir`, sorted by name
pub fn list_subdirectories(dir: &Path) -> Vec<PathBuf> {
    let mut directories: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|read_dir| {
            read_dir
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .filter(|path| {
                    !path
                        .file_name()
                        .map(|n| n.to_string_lossy().starts_with('.'))
                        .unwrap_or(true)
                })
                .collect()
        })
        .unwrap_or_default();
    directories.sort();
    directories
}

pub fn ask_keep_aspect_ratio() -> Result<bool> {
    confirm_step("Keep aspect ratio?")
}

/// Ask for a pixel dimension, re-prompting until it is a positive integer
pub fn ask_dimension(label: &str) -> Result<u32> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Enter {} (in pixels)", label))
        .validate_with(|input: &String| validate_dimension(input).map(|_| ()))
        .interact_text()?;
    validate_dimension(&input).map_err(anyhow::Error::msg)
}

/// Returns `None` when the user dismisses the menu
pub fn select_format() -> Result<Option<OutputFormat>> {
    let labels: Vec<&str> = OutputFormat::ALL.iter().map(|f| f.label()).collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select output format")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| OutputFormat::ALL[i]))
}

pub fn ask_quality() -> Result<u32> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Enter quality ({}-{})",
            Quality::MIN,
            Quality::MAX
        ))
        .default(Quality::DEFAULT.to_string())
        .validate_with(|input: &String| validate_quality(input).map(|_| ()))
        .interact_text()?;
    validate_quality(&input).map_err(anyhow::Error::msg)
}

pub fn ask_output_directory() -> Result<PathBuf> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter output directory")
        .default(DEFAULT_OUTPUT_DIR.to_string())
        .validate_with(|input: &String| parse_output_directory(input).map(|_| ()))
        .interact_text()?;
    parse_output_directory(&input).map_err(anyhow::Error::msg)
}

/// Validate a pixel dimension: a positive integer
pub fn validate_dimension(input: &str) -> Result<u32, String> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a positive whole number", input.trim()))?;

    if value == 0 {
        Err("Dimension must be greater than 0".to_string())
    } else {
        Ok(value)
    }
}

/// Validate a quality value in the 1-100 range
pub fn validate_quality(input: &str) -> Result<u32, String> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", input.trim()))?;

    if !(Quality::MIN as u32..=Quality::MAX as u32).contains(&value) {
        Err(format!(
            "Quality must be between {} and {}, got {}",
            Quality::MIN,
            Quality::MAX,
            value
        ))
    } else {
        Ok(value)
    }
}

/// Parse the output directory, expanding a leading `~` to the home directory
pub fn parse_output_directory(input: &str) -> Result<PathBuf, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Output directory cannot be empty".to_string());
    }

    if trimmed == "~" || trimmed.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
        let rest = trimmed.trim_start_matches('~').trim_start_matches('/');
        return Ok(if rest.is_empty() { home } else { home.join(rest) });
    }

    Ok(PathBuf::from(trimmed))
}
