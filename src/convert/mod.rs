//! Conversion module - job model, command building and batch execution

pub mod command;
pub mod environment;
pub mod error;
pub mod job;
pub mod runner;
pub mod sources;

pub use command::*;
pub use environment::*;
pub use error::ConvertError;
pub use job::*;
pub use runner::*;
pub use sources::*;
