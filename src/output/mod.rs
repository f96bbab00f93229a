//! Output rendering and writers.
//!
//! This module handles:
//! - Plain-text tables, trees and traces for every query
//! - Collapsed-stack text (collapse / filter)
//! - JSON reports
//! - SVG flamegraph files

pub mod collapsed;
pub mod json;
pub mod svg;
pub mod text;

// Re-export main functions
pub use collapsed::{collapsed_lines, filtered_lines};
pub use json::{render_json, write_json};
pub use svg::write_svg;
pub use text::{render_hot, render_lines, render_threads, render_trace, render_tree};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate an output path and create its parent directories
///
/// **Private** - shared by the file writers
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
