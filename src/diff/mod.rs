//! Profile diff generation.
//!
//! This module compares the self-time share of every method between two
//! sample sets (before vs after) and classifies the changes as
//! regressions, improvements, new methods and gone methods.
//!
//! # Example
//! ```ignore
//! use ap_query::diff::{generate_diff, render_terminal_diff};
//!
//! let report = generate_diff(&before, &after, 0.5, 0, false);
//! print!("{}", render_terminal_diff(&report));
//! ```

mod engine;
mod output;
mod schema;

// Public API exports
pub use engine::{generate_diff, self_pcts};
pub use output::render_terminal_diff;
pub use schema::{DiffEntry, DiffReport};
