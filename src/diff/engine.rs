//! Core diff engine implementation.
//! Compares per-method self-time shares of two sample sets.

use super::schema::{DiffEntry, DiffReport};
use crate::aggregator::metrics::percentage;
use crate::aggregator::names::{display_name, truncate_len};
use crate::parser::schema::SampleSet;
use log::debug;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Self-time percentage per leaf display name
pub fn self_pcts(set: &SampleSet, fqn: bool) -> HashMap<String, f64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for stack in set.stacks() {
        if let Some(leaf) = stack.leaf() {
            *counts.entry(display_name(leaf, fqn)).or_insert(0) += stack.count;
        }
    }

    if set.total_samples() == 0 {
        return HashMap::new();
    }
    counts
        .into_iter()
        .map(|(name, count)| (name, percentage(count, set.total_samples())))
        .collect()
}

/// Generate a diff report comparing two sample sets
///
/// # Arguments
/// * `before` - The baseline sample set
/// * `after` - The sample set to compare against the baseline
/// * `min_delta` - Noise floor in percentage points
/// * `top` - Per-bucket row limit (0 = unlimited)
/// * `fqn` - Compare fully-qualified names instead of short names
///
/// # Returns
/// A `DiffReport` whose buckets are sorted by magnitude of change
pub fn generate_diff(
    before: &SampleSet,
    after: &SampleSet,
    min_delta: f64,
    top: usize,
    fqn: bool,
) -> DiffReport {
    let before_pct = self_pcts(before, fqn);
    let after_pct = self_pcts(after, fqn);

    let names: BTreeSet<&String> = before_pct.keys().chain(after_pct.keys()).collect();
    let mut report = DiffReport::default();

    for name in names {
        let entry = |before: f64, after: f64| DiffEntry {
            name: name.clone(),
            before,
            after,
            delta: after - before,
        };

        match (before_pct.get(name), after_pct.get(name)) {
            (Some(&b), Some(&a)) => {
                let delta = a - b;
                if delta == 0.0 || delta.abs() < min_delta {
                    continue;
                }
                if delta > 0.0 {
                    report.regressions.push(entry(b, a));
                } else {
                    report.improvements.push(entry(b, a));
                }
            }
            (None, Some(&a)) if a >= min_delta => report.new.push(entry(0.0, a)),
            (Some(&b), None) if b >= min_delta => report.gone.push(entry(b, 0.0)),
            _ => {}
        }
    }

    sort_bucket(&mut report.regressions, |e| e.delta);
    sort_bucket(&mut report.improvements, |e| -e.delta);
    sort_bucket(&mut report.new, |e| e.after);
    sort_bucket(&mut report.gone, |e| e.before);

    for bucket in [
        &mut report.regressions,
        &mut report.improvements,
        &mut report.new,
        &mut report.gone,
    ] {
        bucket.truncate(truncate_len(bucket.len(), top));
    }

    debug!(
        "Diff: {} regressions, {} improvements, {} new, {} gone",
        report.regressions.len(),
        report.improvements.len(),
        report.new.len(),
        report.gone.len()
    );

    report
}

/// Largest magnitude first, then name
fn sort_bucket(bucket: &mut [DiffEntry], magnitude: impl Fn(&DiffEntry) -> f64) {
    bucket.sort_by(|a, b| {
        magnitude(b)
            .partial_cmp(&magnitude(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}
