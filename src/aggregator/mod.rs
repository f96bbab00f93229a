//! Aggregation of stack samples into rankings and call trees.
//!
//! This module transforms a parsed sample set into:
//! - Display names (short or fully-qualified)
//! - A virtual call tree (callees, callers, or whole-profile)
//! - Greedy hot paths through that tree
//! - Hot-method, thread and source-line rankings

pub mod metrics;
pub mod names;
pub mod path_tree;
pub mod trace;

// Re-export main types and functions
pub use metrics::{
    compute_hot, compute_lines, compute_threads, percentage, rank_hot, HotEntry, HotRanking,
    LineEntry, LinesReport, ThreadEntry, ThreadReport,
};
pub use names::{display_name, matches_method, short_name};
pub use path_tree::{NodeId, PathMode, PathTree, TreeRow};
pub use trace::{trace_hot_paths, HotPath, SiblingHint, TraceStep};
