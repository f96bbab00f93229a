//! JSON output for query reports.
//!
//! Reports are serialized pretty-printed, either to a string for stdout
//! or straight to a file.

use super::prepare_output_path;
use crate::utils::error::OutputError;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize a report to a pretty-printed JSON string
///
/// **Public** - used by `--json` on hot and diff
pub fn render_json<T: Serialize>(report: &T) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_json<T: Serialize>(
    report: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
