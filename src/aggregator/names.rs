//! Frame name resolution.
//!
//! Frames arrive either slash-separated ("com/example/App.process") or
//! dot-separated ("com.example.App.process"). Display names are the
//! normalized dotted form, or just "App.process" in short form.

use crate::utils::config::NAME_DELIMITER;

/// Unify path separators to the name delimiter
pub fn normalize(frame: &str) -> String {
    frame.replace('/', ".")
}

/// Last two name components ("App.process"), or the whole normalized
/// frame when it has fewer than two components
pub fn short_name(frame: &str) -> String {
    let normalized = normalize(frame);
    let mut parts = normalized.rsplitn(3, NAME_DELIMITER);
    match (parts.next(), parts.next()) {
        (Some(member), Some(owner)) => format!("{owner}{NAME_DELIMITER}{member}"),
        _ => normalized,
    }
}

/// Fully-qualified normalized name when `fqn`, else the short name
pub fn display_name(frame: &str, fqn: bool) -> String {
    if fqn {
        normalize(frame)
    } else {
        short_name(frame)
    }
}

/// Substring match against the normalized name or the short name.
///
/// The two forms are tried independently.
pub fn matches_method(frame: &str, pattern: &str) -> bool {
    normalize(frame).contains(pattern) || short_name(frame).contains(pattern)
}

/// Number of rows to keep for a "top N" limit (0 = unlimited)
pub fn truncate_len(len: usize, top: usize) -> usize {
    if top > 0 && top < len {
        top
    } else {
        len
    }
}
