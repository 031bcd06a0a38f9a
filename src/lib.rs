//! ffwizard: Image Conversion Library
//!
//! Collects conversion choices interactively and turns them into one
//! `ffmpeg` invocation per source image.

pub mod cli;
pub mod convert;
pub mod report;
pub mod utils;
