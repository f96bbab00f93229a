//! Flat rankings computed directly from the sample set.
//!
//! - Hot methods by self time (leaf frame) and total time (anywhere in stack)
//! - Sample distribution by thread
//! - Source-line breakdown for a method

use super::names::{display_name, matches_method, truncate_len};
use crate::parser::schema::SampleSet;
use crate::utils::config::NO_THREAD_LABEL;
use crate::utils::error::QueryError;
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Percentage of `total`, or 0.0 when `total` is zero
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// A method with its self and total sample counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotEntry {
    pub name: String,
    pub self_count: u64,
    pub total_count: u64,
}

/// Both hot-method rankings, each truncated to its own top N
#[derive(Debug, Clone, Serialize)]
pub struct HotRanking {
    pub total_samples: u64,
    pub by_self: Vec<HotEntry>,
    pub by_total: Vec<HotEntry>,
}

impl HotRanking {
    /// Fail when the top self-time method is at or above `threshold` percent.
    ///
    /// A threshold of zero or below disables the check.
    pub fn assert_below(&self, threshold: f64) -> Result<(), QueryError> {
        if threshold <= 0.0 {
            return Ok(());
        }
        let Some(top) = self.by_self.first() else {
            return Ok(());
        };
        let self_pct = percentage(top.self_count, self.total_samples);
        if self_pct >= threshold {
            return Err(QueryError::AssertionFailed {
                name: top.name.clone(),
                self_pct,
                threshold,
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.by_self.is_empty()
    }
}

/// Every method with its self and total counts, sorted by self count
/// descending then name.
///
/// Self time goes to the leaf frame only. Total time goes once per stack
/// to every distinct name in it, so recursion is not double counted.
pub fn compute_hot(set: &SampleSet, fqn: bool) -> Vec<HotEntry> {
    if set.is_empty() {
        return Vec::new();
    }

    let mut self_counts: HashMap<String, u64> = HashMap::new();
    let mut total_counts: HashMap<String, u64> = HashMap::new();

    for stack in set.stacks() {
        if let Some(leaf) = stack.leaf() {
            *self_counts.entry(display_name(leaf, fqn)).or_insert(0) += stack.count;
        }
        let mut seen: HashSet<String> = HashSet::new();
        for frame in &stack.frames {
            let name = display_name(frame, fqn);
            if seen.insert(name.clone()) {
                *total_counts.entry(name).or_insert(0) += stack.count;
            }
        }
    }

    let mut ranked: Vec<HotEntry> = total_counts
        .into_iter()
        .map(|(name, total_count)| HotEntry {
            self_count: self_counts.get(&name).copied().unwrap_or(0),
            name,
            total_count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.self_count
            .cmp(&a.self_count)
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!("Ranked {} methods from {} stacks", ranked.len(), set.stacks().len());
    ranked
}

/// Self and total rankings truncated to `top` rows each (0 = unlimited)
pub fn rank_hot(set: &SampleSet, fqn: bool, top: usize) -> HotRanking {
    let by_self = compute_hot(set, fqn);

    let mut by_total = by_self.clone();
    by_total.sort_by(|a, b| {
        b.total_count
            .cmp(&a.total_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    by_total.truncate(truncate_len(by_total.len(), top));

    let mut by_self = by_self;
    by_self.truncate(truncate_len(by_self.len(), top));

    HotRanking {
        total_samples: set.total_samples(),
        by_self,
        by_total,
    }
}

/// Samples attributed to one thread label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadEntry {
    pub name: String,
    pub samples: u64,
}

/// Sample distribution over thread labels
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThreadReport {
    pub total_samples: u64,
    /// Named threads, most samples first
    pub ranked: Vec<ThreadEntry>,
    /// Samples from stacks without a thread label
    pub no_thread: u64,
}

impl ThreadReport {
    pub fn has_thread_info(&self) -> bool {
        !self.ranked.is_empty()
    }

    /// The unlabelled bucket as an entry, when it has samples
    pub fn no_thread_entry(&self) -> Option<ThreadEntry> {
        (self.no_thread > 0).then(|| ThreadEntry {
            name: NO_THREAD_LABEL.to_string(),
            samples: self.no_thread,
        })
    }
}

/// Aggregate samples by thread label
pub fn compute_threads(set: &SampleSet) -> ThreadReport {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut no_thread = 0;

    for stack in set.stacks() {
        if stack.thread.is_empty() {
            no_thread += stack.count;
        } else {
            *counts.entry(stack.thread.as_str()).or_insert(0) += stack.count;
        }
    }

    let mut ranked: Vec<ThreadEntry> = counts
        .into_iter()
        .map(|(name, samples)| ThreadEntry {
            name: name.to_string(),
            samples,
        })
        .collect();
    ranked.sort_by(|a, b| b.samples.cmp(&a.samples).then_with(|| a.name.cmp(&b.name)));

    ThreadReport {
        total_samples: set.total_samples(),
        ranked,
        no_thread,
    }
}

/// Samples at one source line of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineEntry {
    pub name: String,
    pub line: u32,
    pub samples: u64,
}

/// Outcome of a lines query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinesReport {
    /// The pattern matched no frame at all
    NoMatch,
    /// Lines ranked by samples (empty for empty input)
    Lines(Vec<LineEntry>),
}

/// Aggregate samples by (method, line) for frames matching `pattern`.
///
/// A (name, line) pair repeated within one stack counts that stack once.
///
/// # Errors
/// * `QueryError::NoLineInfo` - frames matched but none carried a line number
pub fn compute_lines(
    set: &SampleSet,
    pattern: &str,
    top: usize,
    fqn: bool,
) -> Result<LinesReport, QueryError> {
    if set.is_empty() {
        return Ok(LinesReport::Lines(Vec::new()));
    }

    let mut counts: HashMap<(String, u32), u64> = HashMap::new();
    let mut matched_any = false;

    for stack in set.stacks() {
        let mut seen: HashSet<(String, u32)> = HashSet::new();
        for (frame, &line) in stack.frames.iter().zip(&stack.lines) {
            if !matches_method(frame, pattern) {
                continue;
            }
            matched_any = true;
            if line == 0 {
                continue;
            }
            let key = (display_name(frame, fqn), line);
            if seen.insert(key.clone()) {
                *counts.entry(key).or_insert(0) += stack.count;
            }
        }
    }

    if counts.is_empty() {
        return if matched_any {
            Err(QueryError::NoLineInfo {
                pattern: pattern.to_string(),
            })
        } else {
            Ok(LinesReport::NoMatch)
        };
    }

    let mut ranked: Vec<LineEntry> = counts
        .into_iter()
        .map(|((name, line), samples)| LineEntry {
            name,
            line,
            samples,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.samples
            .cmp(&a.samples)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.line.cmp(&b.line))
    });
    ranked.truncate(truncate_len(ranked.len(), top));

    Ok(LinesReport::Lines(ranked))
}
