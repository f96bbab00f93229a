//! Configuration and constants for the CLI.

/// Separator between frames in a collapsed stack and segments in a path key
pub const PATH_DELIMITER: char = ';';

/// Separator between package/class/method components after normalization
pub const NAME_DELIMITER: char = '.';

// Default limits per command (0 means unlimited)
pub const DEFAULT_HOT_TOP: usize = 10;
pub const DEFAULT_THREADS_TOP: usize = 0;
pub const DEFAULT_LINES_TOP: usize = 0;
pub const DEFAULT_DIFF_TOP: usize = 0;

// Tree/callers/trace pruning
pub const DEFAULT_TREE_DEPTH: usize = 4;
pub const DEFAULT_MIN_PCT: f64 = 1.0;
pub const DEFAULT_TRACE_MIN_PCT: f64 = 0.5;

/// Minimum self% change for a method to show up in a diff
pub const DEFAULT_MIN_DELTA: f64 = 0.5;

// info: one-shot triage
pub const DEFAULT_INFO_THREADS: usize = 5;
pub const DEFAULT_INFO_METHODS: usize = 10;
pub const DEFAULT_INFO_EXPAND: usize = 3;
pub const DRILL_DOWN_DEPTH: usize = 3;
pub const DRILL_DOWN_MIN_PCT: f64 = 1.0;
pub const DRILL_DOWN_LINES: usize = 5;

/// Label of the thread bucket for stacks that carry no thread name
pub const NO_THREAD_LABEL: &str = "(no thread info)";

/// Default flamegraph title
pub const DEFAULT_FLAMEGRAPH_TITLE: &str = "Flame Graph";
