//! Argument structs for every command.
//!
//! **Public** - constructed by main.rs from parsed CLI values

use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::{
    DEFAULT_DIFF_TOP, DEFAULT_HOT_TOP, DEFAULT_INFO_EXPAND, DEFAULT_INFO_METHODS,
    DEFAULT_INFO_THREADS, DEFAULT_LINES_TOP, DEFAULT_MIN_DELTA, DEFAULT_MIN_PCT,
    DEFAULT_THREADS_TOP, DEFAULT_TRACE_MIN_PCT, DEFAULT_TREE_DEPTH,
};
use std::path::PathBuf;

/// Where samples come from and which thread to keep
#[derive(Debug, Clone)]
pub struct InputArgs {
    /// Profile path (`-` for stdin)
    pub path: PathBuf,

    /// Keep only stacks whose thread label contains this substring
    pub thread: Option<String>,
}

impl Default for InputArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("-"),
            thread: None,
        }
    }
}

/// Arguments for the hot command
#[derive(Debug, Clone)]
pub struct HotArgs {
    pub input: InputArgs,

    /// Rows per table (0 = all)
    pub top: usize,

    /// Show fully-qualified names
    pub fqn: bool,

    /// Fail when the top self-time method is at or above this percentage
    pub assert_below: Option<f64>,

    /// Print JSON instead of tables
    pub json: bool,

    /// Write the JSON report here instead of stdout
    pub output: Option<PathBuf>,
}

impl Default for HotArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            top: DEFAULT_HOT_TOP,
            fqn: false,
            assert_below: None,
            json: false,
            output: None,
        }
    }
}

/// Arguments for the tree and callers commands
#[derive(Debug, Clone)]
pub struct TreeArgs {
    pub input: InputArgs,

    /// Method pattern; None renders the whole profile from its roots
    pub method: Option<String>,

    pub depth: usize,
    pub min_pct: f64,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            method: None,
            depth: DEFAULT_TREE_DEPTH,
            min_pct: DEFAULT_MIN_PCT,
        }
    }
}

/// Arguments for the trace command
#[derive(Debug, Clone)]
pub struct TraceArgs {
    pub input: InputArgs,
    pub method: String,
    pub min_pct: f64,
    pub fqn: bool,
}

impl Default for TraceArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            method: String::new(),
            min_pct: DEFAULT_TRACE_MIN_PCT,
            fqn: false,
        }
    }
}

/// Arguments for the lines command
#[derive(Debug, Clone)]
pub struct LinesArgs {
    pub input: InputArgs,
    pub method: String,
    pub top: usize,
    pub fqn: bool,
}

impl Default for LinesArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            method: String::new(),
            top: DEFAULT_LINES_TOP,
            fqn: false,
        }
    }
}

/// Arguments for the threads command
#[derive(Debug, Clone)]
pub struct ThreadsArgs {
    pub input: InputArgs,
    pub top: usize,
}

impl Default for ThreadsArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            top: DEFAULT_THREADS_TOP,
        }
    }
}

/// Arguments for the info command
#[derive(Debug, Clone)]
pub struct InfoArgs {
    pub input: InputArgs,

    /// Thread rows shown
    pub top_threads: usize,

    /// Rows per hot-method table
    pub top_methods: usize,

    /// Number of top self-time methods to drill into
    pub expand: usize,
}

impl Default for InfoArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            top_threads: DEFAULT_INFO_THREADS,
            top_methods: DEFAULT_INFO_METHODS,
            expand: DEFAULT_INFO_EXPAND,
        }
    }
}

/// Arguments for the diff command
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Baseline profile
    pub before: InputArgs,

    /// Profile compared against the baseline
    pub after: InputArgs,

    /// Noise floor in percentage points
    pub min_delta: f64,

    /// Rows per section (0 = all)
    pub top: usize,

    pub fqn: bool,

    /// Print JSON instead of sections
    pub json: bool,

    /// Write the JSON report here instead of stdout
    pub output: Option<PathBuf>,
}

impl Default for DiffArgs {
    fn default() -> Self {
        Self {
            before: InputArgs::default(),
            after: InputArgs::default(),
            min_delta: DEFAULT_MIN_DELTA,
            top: DEFAULT_DIFF_TOP,
            fqn: false,
            json: false,
            output: None,
        }
    }
}

/// Arguments for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub input: InputArgs,
    pub method: String,

    /// Keep the frames above the match too
    pub include_callers: bool,
}

/// Arguments for the flamegraph command
#[derive(Debug, Clone)]
pub struct FlamegraphArgs {
    pub input: InputArgs,

    /// Output path for the SVG
    pub output: PathBuf,

    pub config: FlamegraphConfig,
}

impl Default for FlamegraphArgs {
    fn default() -> Self {
        Self {
            input: InputArgs::default(),
            output: PathBuf::from("flamegraph.svg"),
            config: FlamegraphConfig::default(),
        }
    }
}
