//! Snapshot input sources.
//!
//! A snapshot is read once, in full, from either a file path or piped stdin.

use crate::model::error::InputError;
use crate::model::AppError;
use crate::snapshot::Snapshot;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

/// Where the snapshot document comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Snapshot file on disk.
    File(PathBuf),
    /// Snapshot piped to stdin.
    Stdin,
}

impl InputSource {
    /// Read the whole input as text.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file vanished since detection.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                Ok(std::fs::read_to_string(path)?)
            }
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin().lock().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    /// Read and decode the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InputRead` for I/O failures and `AppError::Snapshot`
    /// for documents that are not valid snapshots.
    pub fn read_snapshot(&self) -> Result<Snapshot, AppError> {
        let text = self.read_to_string()?;
        debug!(source = %self, bytes = text.len(), "read snapshot input");
        Ok(Snapshot::from_json_str(&text)?)
    }

    /// Fallback title when the snapshot itself records no location.
    pub fn display_name(&self) -> String {
        match self {
            InputSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided and exists: `InputSource::File`
/// 2. If stdin is piped: `InputSource::Stdin`
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::NoInput` if no file is given and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path.exists() => Ok(InputSource::File(path)),
        Some(path) => Err(InputError::FileNotFound { path }),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
