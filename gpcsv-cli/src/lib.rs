//! CLI library for testing purposes

pub mod config;
pub mod export;
pub mod import;
pub mod view;

pub use config::{CliConfig, RuleArgs};
