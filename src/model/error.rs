//! Error types for varscope.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions into [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - Snapshot file/stdin reading failures
//!   - [`SnapshotError`] - Snapshot decoding failures (bad JSON, bad value tags)
//!   - [`SegmentError`] - Invalid segmentation parameters
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! Empty collections, unsegmented collections and deeply nested values are never
//! errors: every valid snapshot produces a deterministic tree.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use varscope::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = read_snapshot_file()?;
///     Ok(())
/// }
/// # fn read_snapshot_file() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Input was read but is not a valid snapshot.
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Segmentation was requested with an unusable band size.
    #[error("Segmentation failed: {0}")]
    Segment(#[from] SegmentError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading snapshot input from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given snapshot file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use varscope::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file path was given and stdin is an interactive terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use varscope::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe"));
    /// ```
    #[error("No input source: provide a snapshot file path or pipe a snapshot to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while decoding a snapshot document into values.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not syntactically valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root must be a JSON object.
    #[error("Snapshot root must be a JSON object")]
    NotAnObject,

    /// A top-level field has the wrong shape.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the offending top-level field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A value could not be decoded.
    ///
    /// `path` points at the offending value, e.g. `/locals/data/$object/attrs/x`.
    #[error("Invalid value at {path}: {reason}")]
    InvalidValue {
        /// JSON-pointer-like location of the value.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Errors from the segmentation policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// Band size must be a positive integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use varscope::model::error::SegmentError;
    ///
    /// let err = SegmentError::InvalidBandSize { value: 0 };
    /// assert_eq!(err.to_string(), "Band size must be a positive integer, got 0");
    /// ```
    #[error("Band size must be a positive integer, got {value}")]
    InvalidBandSize {
        /// The rejected value.
        value: i64,
    },
}
