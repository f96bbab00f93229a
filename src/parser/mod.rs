//! Profile input decoding and the normalized sample model.
//!
//! This module handles:
//! - Defining the sample model shared by every query
//! - Parsing collapsed-stack text
//! - Opening inputs (files, gzip, stdin)

pub mod collapsed;
pub mod schema;

// Re-export main types
pub use collapsed::{parse_collapsed, parse_line};
pub use schema::{SampleSet, Stack};

use crate::utils::error::ParseError;
use flate2::read::GzDecoder;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Path that selects stdin instead of a file
pub const STDIN_PATH: &str = "-";

/// Whether a path names a JFR recording (binary event format)
pub fn is_jfr_path(path: &Path) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    lower.ends_with(".jfr") || lower.ends_with(".jfr.gz")
}

/// Open and decode a profile input
///
/// `-` reads collapsed text from stdin; `*.gz` files are gunzipped.
///
/// # Errors
/// * `ParseError::UnsupportedFormat` - JFR recordings
/// * `ParseError::Io` - the file cannot be opened or read
pub fn open_input(path: impl AsRef<Path>) -> Result<SampleSet, ParseError> {
    let path = path.as_ref();

    if path.as_os_str() == STDIN_PATH {
        info!("Reading collapsed stacks from stdin");
        return parse_collapsed(io::stdin().lock());
    }

    if is_jfr_path(path) {
        return Err(ParseError::UnsupportedFormat(format!(
            "{} (JFR recordings must be converted to collapsed text first)",
            path.display()
        )));
    }

    info!("Reading collapsed stacks from {}", path.display());
    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    parse_collapsed(BufReader::new(reader))
}
