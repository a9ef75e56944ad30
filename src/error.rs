//! Error types for seamweave.
//!
//! This module defines the error type returned by the orchestration layer.
//! Engine-level failures are described by [`crate::engine::EngineError`] and
//! wrapped into [`SynthError::EngineFailure`] with the stage and edge index
//! attached.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;

/// Result type alias using [`SynthError`].
pub type Result<T> = std::result::Result<T, SynthError>;

/// Pipeline stage in which an engine call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Island fill.
    Fill,
    /// Seam repair.
    Seam,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fill => f.write_str("fill"),
            Stage::Seam => f.write_str("seam"),
        }
    }
}

/// Errors that can occur while orchestrating a synthesis run.
#[derive(Error, Debug)]
pub enum SynthError {
    /// The island set is empty or rasterizes to an empty region.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The synthesis engine rejected a call.
    #[error("engine failure during {stage}{}: {source}", edge_suffix(.edge))]
    EngineFailure {
        /// Stage that invoked the engine.
        stage: Stage,
        /// Edge index, for seam failures.
        edge: Option<usize>,
        /// The engine's error.
        #[source]
        source: EngineError,
    },

    /// A required field of the input record is missing.
    #[error("configuration error: missing field `{field}`")]
    Configuration {
        /// Name of the missing field.
        field: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a record or image from file.
    #[error("failed to load {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving a record or image to file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

fn edge_suffix(edge: &Option<usize>) -> String {
    match edge {
        Some(i) => format!(" (edge #{})", i),
        None => String::new(),
    }
}

impl SynthError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: fmt::Display>(name: &'static str, value: T, reason: &'static str) -> Self {
        SynthError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Wrap an engine error raised during the fill stage.
    pub fn fill_failure(source: EngineError) -> Self {
        SynthError::EngineFailure {
            stage: Stage::Fill,
            edge: None,
            source,
        }
    }

    /// Wrap an engine error raised while processing edge `index`.
    pub fn seam_failure(index: usize, source: EngineError) -> Self {
        SynthError::EngineFailure {
            stage: Stage::Seam,
            edge: Some(index),
            source,
        }
    }
}
