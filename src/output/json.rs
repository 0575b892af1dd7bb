//! JSON index export writer.
//!
//! Writes the current index to disk so other tools (or a quick `jq`) can
//! inspect which issues landed on which lines.

use crate::index::IssueIndex;
use crate::parser::schema::Issue;
use crate::utils::config::EXPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level structure of an exported index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// When the exported index was built
    pub built_at: DateTime<Utc>,

    /// When this file was written
    pub generated_at: DateTime<Utc>,

    /// Annotated files, sorted by path
    pub files: Vec<FileExport>,
}

/// Issues of one local file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileExport {
    pub path: String,
    pub lines: Vec<LineExport>,
}

/// Issues of one line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineExport {
    pub line: u32,
    pub issues: Vec<Issue>,
}

/// Convert an index into its export form
///
/// **Public** - useful for tests and in-memory use
pub fn to_export(index: &IssueIndex) -> IndexExport {
    let mut files: Vec<FileExport> = Vec::new();

    for (path, line, issues) in index.entries() {
        let path = path.display().to_string();
        let entry = LineExport {
            line,
            issues: issues.to_vec(),
        };

        if files.last().is_some_and(|file| file.path == path) {
            if let Some(file) = files.last_mut() {
                file.lines.push(entry);
            }
        } else {
            files.push(FileExport {
                path,
                lines: vec![entry],
            });
        }
    }

    IndexExport {
        version: EXPORT_SCHEMA_VERSION.to_string(),
        built_at: index.built_at(),
        generated_at: Utc::now(),
        files,
    }
}

/// Write an index to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_index(index: &IssueIndex, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing index to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &to_export(index))
        .map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read an exported index back
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_index(input_path: impl AsRef<Path>) -> Result<IndexExport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading index from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let export = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(export)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
