//! CLI command implementations.
//!
//! Each command family is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod diff;
pub mod export;
pub mod models;
pub mod query;
mod utils;

// Re-export main command functions
pub use diff::execute_diff;
pub use export::{execute_collapse, execute_filter, execute_flamegraph};
pub use models::{
    DiffArgs, FilterArgs, FlamegraphArgs, HotArgs, InfoArgs, InputArgs, LinesArgs, ThreadsArgs,
    TraceArgs, TreeArgs,
};
pub use query::{
    execute_callers, execute_hot, execute_info, execute_lines, execute_threads, execute_trace,
    execute_tree,
};
pub use utils::load_samples;
