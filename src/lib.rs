//! ap-query
//!
//! Query tool for async-profiler stack samples: hot methods, call trees,
//! callers, hot paths, source lines, thread distribution and profile diffs,
//! all rendered as compact plain text.
//!
//! This crate provides the core implementation for the `ap-query` CLI.
//! Every query is a pure function over a [`parser::SampleSet`], so the
//! library can also be used directly:
//!
//! ```ignore
//! use ap_query::aggregator::{rank_hot, PathTree};
//! use ap_query::output::{render_hot, render_tree};
//! use ap_query::parser::open_input;
//!
//! let set = open_input("profile.collapsed")?;
//! print!("{}", render_hot(&rank_hot(&set, false, 10), false));
//! print!("{}", render_tree(&PathTree::descendants(&set, "Db.query"), "Db.query", 4, 1.0, true));
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
