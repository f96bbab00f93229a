//! Collapsed-stack text decoder.
//!
//! Format: one stack per line, frames separated by `;`, followed by
//! whitespace and a positive sample count.
//!
//! Example: "[main tid=1];com/example/App.run;com/example/App.work:42 17"
//! This means: 17 samples on thread "main" where App.run called App.work,
//! with App.work sampled at line 42.

use super::schema::{SampleSet, Stack};
use crate::utils::config::PATH_DELIMITER;
use crate::utils::error::ParseError;
use log::debug;
use std::io::BufRead;

/// Largest accepted sample count; bigger values mark the line malformed
const MAX_COUNT: u64 = i64::MAX as u64;

/// Parse collapsed-stack text into a sample set
///
/// Malformed lines (no count, zero count, no frames) are skipped. Bytes
/// that are not valid UTF-8 are replaced rather than failing the parse.
///
/// # Errors
/// * `ParseError::Io` - the reader failed
pub fn parse_collapsed(mut reader: impl BufRead) -> Result<SampleSet, ParseError> {
    let mut set = SampleSet::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Some(stack) => set.push(stack),
            None => skipped += 1,
        }
    }

    debug!(
        "Parsed {} collapsed stacks ({} samples, {} lines skipped)",
        set.stacks().len(),
        set.total_samples(),
        skipped
    );

    Ok(set)
}

/// Parse a single collapsed line into a stack
pub fn parse_line(line: &str) -> Option<Stack> {
    let (frames_str, count) = split_count(line)?;

    let mut parts: Vec<&str> = frames_str.split(PATH_DELIMITER).collect();
    let mut thread = String::new();
    if let Some(label) = parts.first().and_then(|first| parse_thread_marker(first)) {
        thread = label.to_string();
        parts.remove(0);
    }

    if parts.is_empty() {
        return None;
    }

    let (frames, lines): (Vec<String>, Vec<u32>) = parts
        .into_iter()
        .map(|part| {
            let (name, line) = parse_annotated_frame(part);
            (name.to_string(), line)
        })
        .unzip();

    Some(Stack::new(frames, count).with_lines(lines).with_thread(thread))
}

/// Split "frames count" at the trailing whitespace-separated count
fn split_count(line: &str) -> Option<(&str, u64)> {
    let line = line.trim_end();
    let pos = line.rfind(char::is_whitespace)?;
    let count_str = &line[pos + 1..];
    if count_str.is_empty() || !count_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count: u64 = count_str.parse().ok()?;
    if count == 0 || count > MAX_COUNT {
        return None;
    }

    let frames = line[..pos].trim_end();
    if frames.is_empty() {
        return None;
    }
    Some((frames, count))
}

/// "[name]" or "[name tid=123]" -> "name"
fn parse_thread_marker(frame: &str) -> Option<&str> {
    let inner = frame.strip_prefix('[')?.strip_suffix(']')?;
    let name = match inner.rfind(" tid=") {
        Some(pos) if is_digits(&inner[pos + 5..]) => &inner[..pos],
        _ => inner,
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// "App.work:42" or "App.work:42_[j]" -> ("App.work", 42); anything else keeps line 0
fn parse_annotated_frame(frame: &str) -> (&str, u32) {
    let mut candidate = frame;
    if frame.ends_with(']') {
        if let Some(pos) = frame.rfind("_[") {
            if !frame[pos + 2..frame.len() - 1].contains(']') {
                candidate = &frame[..pos];
            }
        }
    }

    match candidate.rsplit_once(':') {
        Some((name, line)) if !name.is_empty() && is_digits(line) => {
            (name, line.parse().unwrap_or(0))
        }
        _ => (frame, 0),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
