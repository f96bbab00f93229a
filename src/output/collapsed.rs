//! Collapsed-stack text encoder.
//!
//! Writes stacks back out as `[thread];frame;...;frame COUNT`, one per
//! line. Line annotations are not re-emitted.

use crate::aggregator::names::matches_method;
use crate::parser::schema::{SampleSet, Stack};
use crate::utils::config::PATH_DELIMITER;

/// Encode one stack with the given frames
fn encode(stack: &Stack, frames: &[String]) -> String {
    let delimiter = PATH_DELIMITER.to_string();
    let thread_prefix = if stack.thread.is_empty() {
        String::new()
    } else {
        format!("[{}]{}", stack.thread, PATH_DELIMITER)
    };
    format!("{}{} {}", thread_prefix, frames.join(&delimiter), stack.count)
}

/// Every stack as a collapsed line, in input order
pub fn collapsed_lines(set: &SampleSet) -> Vec<String> {
    set.stacks()
        .iter()
        .map(|stack| encode(stack, &stack.frames))
        .collect()
}

/// Stacks containing a frame matching `pattern`.
///
/// Each line keeps the frames from the first match to the leaf, or the
/// whole stack with `include_callers`.
pub fn filtered_lines(set: &SampleSet, pattern: &str, include_callers: bool) -> Vec<String> {
    set.stacks()
        .iter()
        .filter_map(|stack| {
            let idx = stack
                .frames
                .iter()
                .position(|frame| matches_method(frame, pattern))?;
            let frames = if include_callers {
                &stack.frames[..]
            } else {
                &stack.frames[idx..]
            };
            Some(encode(stack, frames))
        })
        .collect()
}

/// Join encoded lines into printable text
pub fn to_text(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}
