//! Options controlling how [`crate::CsvCodec`] reads and writes files.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaMode;

/// Codec behavior options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Column schema and import strictness.
    pub mode: SchemaMode,
    /// Project name handed to row hooks on export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl CodecOptions {
    /// Creates default options (strict mode, no project).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema mode.
    pub fn with_mode(mut self, mode: SchemaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the project name.
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }
}
