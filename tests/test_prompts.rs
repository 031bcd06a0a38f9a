//! Tests for prompt input validation
//!
//! Only the pure validators are covered here; the dialoguer and ratatui
//! screens need a real terminal.

use std::path::PathBuf;

use ffwizard::cli::{
    list_subdirectories, parse_output_directory, validate_dimension, validate_quality,
    DEFAULT_OUTPUT_DIR,
};
use tempfile::TempDir;

#[test]
fn test_validate_dimension_accepts_positive_integers() {
    assert_eq!(validate_dimension("480"), Ok(480));
    assert_eq!(validate_dimension("  1 "), Ok(1));
}

#[test]
fn test_validate_dimension_rejects_invalid_input() {
    for input in ["0", "-5", "12.5", "abc", "", "4k"] {
        assert!(
            validate_dimension(input).is_err(),
            "'{}' should be rejected",
            input
        );
    }
}

#[test]
fn test_validate_quality_range() {
    assert_eq!(validate_quality("1"), Ok(1));
    assert_eq!(validate_quality("75"), Ok(75));
    assert_eq!(validate_quality("100"), Ok(100));

    let err = validate_quality("101").unwrap_err();
    assert!(err.contains("between 1 and 100"));
    assert!(validate_quality("0").is_err());
    assert!(validate_quality("high").is_err());
}

#[test]
fn test_parse_output_directory() {
    assert_eq!(
        parse_output_directory(DEFAULT_OUTPUT_DIR),
        Ok(PathBuf::from("out/"))
    );
    assert_eq!(
        parse_output_directory("  converted/webp "),
        Ok(PathBuf::from("converted/webp"))
    );
    assert!(parse_output_directory("   ").is_err());
}

#[test]
fn test_parse_output_directory_expands_home() {
    if let Some(home) = dirs::home_dir() {
        assert_eq!(parse_output_directory("~"), Ok(home.clone()));
        assert_eq!(parse_output_directory("~/pics"), Ok(home.join("pics")));
    }
    // Only a leading "~/" is expanded
    assert_eq!(
        parse_output_directory("~pics"),
        Ok(PathBuf::from("~pics"))
    );
}

#[test]
fn test_list_subdirectories_skips_hidden_and_files() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("b_photos")).unwrap();
    std::fs::create_dir(temp_dir.path().join("a_scans")).unwrap();
    std::fs::create_dir(temp_dir.path().join(".cache")).unwrap();
    std::fs::write(temp_dir.path().join("file.png"), b"x").unwrap();

    let dirs = list_subdirectories(temp_dir.path());
    assert_eq!(
        dirs,
        vec![
            temp_dir.path().join("a_scans"),
            temp_dir.path().join("b_photos")
        ]
    );
}
