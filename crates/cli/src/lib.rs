//! Local collaborator for the `scoring` engine: loads events and results
//! from JSON files, runs the engine and writes the results back.

pub mod config;
pub mod error;
pub mod export;
pub mod store;
pub mod template;

pub use config::Config;
pub use error::{CliError, Result};
pub use store::{JsonStore, ResultStore, find_event};
