//! Tests for resolving the user's selection into source images

mod common;

use std::path::PathBuf;

use common::create_source_dir;
use ffwizard::convert::{resolve_sources, SourceKind};

#[test]
fn test_directory_splits_supported_and_unsupported() {
    let temp_dir = create_source_dir(&["a.png", "b.txt", "c.jpg"]);

    let set = resolve_sources(temp_dir.path(), SourceKind::Directory).unwrap();

    assert_eq!(
        set.images,
        vec![temp_dir.path().join("a.png"), temp_dir.path().join("c.jpg")]
    );
    assert_eq!(set.unsupported, vec![temp_dir.path().join("b.txt")]);
}

#[test]
fn test_directory_listing_is_sorted_and_shallow() {
    let temp_dir = create_source_dir(&["z.webp", "m.GIF", "a.tiff"]);
    let nested = temp_dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("deep.png"), b"x").unwrap();

    let set = resolve_sources(temp_dir.path(), SourceKind::Directory).unwrap();

    let names: Vec<String> = set
        .images
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.tiff", "m.GIF", "z.webp"]);
    assert!(set.unsupported.is_empty(), "directories are not files to skip");
}

#[test]
fn test_empty_directory_has_no_sources() {
    let temp_dir = create_source_dir(&[]);
    let set = resolve_sources(temp_dir.path(), SourceKind::Directory).unwrap();
    assert!(set.is_empty());
    assert!(set.unsupported.is_empty());
}

#[test]
fn test_missing_directory_is_an_error() {
    let temp_dir = create_source_dir(&[]);
    let missing = temp_dir.path().join("does_not_exist");
    assert!(resolve_sources(&missing, SourceKind::Directory).is_err());
}

#[test]
fn test_all_supported_extensions_are_counted() {
    let files = [
        "1.jpg", "2.jpeg", "3.png", "4.webp", "5.gif", "6.bmp", "7.tiff", "8.tif", "9.svg",
        "10.mp4",
    ];
    let temp_dir = create_source_dir(&files);

    let set = resolve_sources(temp_dir.path(), SourceKind::Directory).unwrap();

    assert_eq!(set.images.len(), 8);
    assert_eq!(set.unsupported.len(), 2);
}

#[test]
fn test_single_file_selection_is_not_listed() {
    let set = resolve_sources(&PathBuf::from("photo.jpeg"), SourceKind::File).unwrap();
    assert_eq!(set.images, vec![PathBuf::from("photo.jpeg")]);
}
