//! Query commands over a single profile.
//!
//! Each command has a pure `*_text` function producing exactly what gets
//! printed, and an `execute_*` entry point that loads the input, prints
//! the text and surfaces query failures. An empty sample set prints
//! nothing.

use super::models::{HotArgs, InfoArgs, LinesArgs, ThreadsArgs, TraceArgs, TreeArgs};
use super::utils::load_samples;
use crate::aggregator::metrics::{
    compute_hot, compute_lines, compute_threads, percentage, rank_hot, LinesReport,
};
use crate::aggregator::names::truncate_len;
use crate::aggregator::path_tree::{PathMode, PathTree};
use crate::output::json::{render_json, write_json};
use crate::output::text::{
    render_hot, render_lines, render_threads, render_trace, render_tree, thread_row,
};
use crate::parser::schema::SampleSet;
use crate::utils::config::{DRILL_DOWN_DEPTH, DRILL_DOWN_LINES, DRILL_DOWN_MIN_PCT};
use crate::utils::error::QueryError;
use anyhow::{Context, Result};
use log::info;
use std::fmt::Write;

/// Execute the hot command
///
/// Prints both rankings (or JSON), then applies `--assert-below`.
///
/// # Errors
/// * Input read failures
/// * `QueryError::AssertionFailed` when the top self-time method is at or above the threshold
pub fn execute_hot(args: HotArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    if set.is_empty() {
        return Ok(());
    }

    let ranking = rank_hot(&set, args.fqn, args.top);
    if args.json {
        match &args.output {
            Some(path) => {
                write_json(&ranking, path).context("Failed to write hot report JSON")?;
                info!("Hot report written to {}", path.display());
            }
            None => println!("{}", render_json(&ranking)?),
        }
    } else {
        print!("{}", render_hot(&ranking, false));
    }

    if let Some(threshold) = args.assert_below {
        ranking.assert_below(threshold)?;
    }
    Ok(())
}

/// Callee tree (`Descendants`) or caller tree (`Ancestors`) text.
///
/// Without a method the whole profile is rendered from its roots.
pub fn tree_text(set: &SampleSet, args: &TreeArgs, mode: PathMode) -> String {
    if set.is_empty() {
        return String::new();
    }

    match args.method.as_deref() {
        Some(pattern) => {
            let tree = PathTree::build(set, mode, pattern, false);
            let show_self = mode != PathMode::Ancestors;
            render_tree(&tree, pattern, args.depth, args.min_pct, show_self)
        }
        None => render_tree(&PathTree::from_root(set), "", args.depth, args.min_pct, true),
    }
}

/// Execute the tree command
pub fn execute_tree(args: TreeArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!("{}", tree_text(&set, &args, PathMode::Descendants));
    Ok(())
}

/// Execute the callers command
pub fn execute_callers(args: TreeArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!("{}", tree_text(&set, &args, PathMode::Ancestors));
    Ok(())
}

pub fn trace_text(set: &SampleSet, args: &TraceArgs) -> String {
    if set.is_empty() {
        return String::new();
    }
    let tree = PathTree::build(set, PathMode::Descendants, &args.method, args.fqn);
    render_trace(&tree, &args.method, args.min_pct)
}

/// Execute the trace command
pub fn execute_trace(args: TraceArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!("{}", trace_text(&set, &args));
    Ok(())
}

/// Lines text, or `QueryError::NoLineInfo` when matched frames carry no line numbers
pub fn lines_text(set: &SampleSet, args: &LinesArgs) -> Result<String, QueryError> {
    let report = compute_lines(set, &args.method, args.top, args.fqn)?;
    Ok(render_lines(&report, &args.method, set.total_samples()))
}

/// Execute the lines command
pub fn execute_lines(args: LinesArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!("{}", lines_text(&set, &args)?);
    Ok(())
}

pub fn threads_text(set: &SampleSet, args: &ThreadsArgs) -> String {
    render_threads(&compute_threads(set), args.top)
}

/// Execute the threads command
pub fn execute_threads(args: ThreadsArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!("{}", threads_text(&set, &args));
    Ok(())
}

/// One-shot triage: top threads, both hot tables, and a drill-down
/// (callees, callers, lines) for the hottest self-time methods
pub fn info_text(set: &SampleSet, args: &InfoArgs) -> String {
    let mut out = String::new();
    if set.is_empty() {
        return out;
    }
    let total = set.total_samples();

    let threads = compute_threads(set);
    if threads.has_thread_info() {
        let shown = &threads.ranked[..truncate_len(threads.ranked.len(), args.top_threads)];
        let _ = writeln!(out, "=== THREADS (top {}) ===", shown.len());
        for entry in shown {
            out.push_str(&thread_row(entry, total));
        }
        out.push('\n');
    }

    out.push_str(&render_hot(&rank_hot(set, false, args.top_methods), true));
    let _ = writeln!(out, "\nTotal samples: {}", total);

    for entry in compute_hot(set, false).iter().take(args.expand) {
        out.push_str(&drill_down(set, &entry.name, percentage(entry.self_count, total)));
    }

    out
}

fn drill_down(set: &SampleSet, name: &str, self_pct: f64) -> String {
    let mut out = format!("\n=== DRILL-DOWN: {} (self={:.1}%) ===\n", name, self_pct);

    out.push_str("--- tree (callees) ---\n");
    out.push_str(&render_tree(
        &PathTree::descendants(set, name),
        name,
        DRILL_DOWN_DEPTH,
        DRILL_DOWN_MIN_PCT,
        true,
    ));

    out.push_str("--- callers ---\n");
    out.push_str(&render_tree(
        &PathTree::ancestors(set, name),
        name,
        DRILL_DOWN_DEPTH,
        DRILL_DOWN_MIN_PCT,
        false,
    ));

    if let Ok(LinesReport::Lines(lines)) = compute_lines(set, name, DRILL_DOWN_LINES, false) {
        if !lines.is_empty() {
            out.push_str("--- lines ---\n");
            for entry in lines {
                let _ = writeln!(
                    out,
                    "{}:{:<8} {:>8} {:>6.1}%",
                    entry.name,
                    entry.line,
                    entry.samples,
                    percentage(entry.samples, set.total_samples())
                );
            }
        }
    }

    out
}

/// Execute the info command
pub fn execute_info(args: InfoArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!("{}", info_text(&set, &args));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Stack;
    use pretty_assertions::assert_eq;

    fn service() -> SampleSet {
        SampleSet::from_stacks(vec![
            Stack::new(["com/app/Main.main", "com/app/Db.query"], 6)
                .with_lines(vec![10, 88])
                .with_thread("worker"),
            Stack::new(["com/app/Main.main", "com/app/Json.encode"], 4).with_thread("io"),
        ])
    }

    #[test]
    fn test_tree_text_without_method() {
        let args = TreeArgs::default();
        assert_eq!(
            tree_text(&service(), &args, PathMode::Descendants),
            "[100.0%] Main.main\n  [60.0%] Db.query  ← self=60.0%\n  [40.0%] Json.encode  ← self=40.0%\n"
        );
    }

    #[test]
    fn test_callers_text_has_no_self_marker() {
        let args = TreeArgs {
            method: Some("Db.query".to_string()),
            ..TreeArgs::default()
        };
        assert_eq!(
            tree_text(&service(), &args, PathMode::Ancestors),
            "[60.0%] Db.query\n  [60.0%] Main.main\n"
        );
    }

    #[test]
    fn test_empty_input_prints_nothing() {
        let empty = SampleSet::new();
        assert_eq!(tree_text(&empty, &TreeArgs::default(), PathMode::Descendants), "");
        assert_eq!(trace_text(&empty, &TraceArgs::default()), "");
        assert_eq!(threads_text(&empty, &ThreadsArgs::default()), "");
        assert_eq!(info_text(&empty, &InfoArgs::default()), "");
        let lines = LinesArgs {
            method: "x".to_string(),
            ..LinesArgs::default()
        };
        assert_eq!(lines_text(&empty, &lines).unwrap(), "");
    }

    #[test]
    fn test_lines_text_errors() {
        let args = LinesArgs {
            method: "Json.encode".to_string(),
            ..LinesArgs::default()
        };
        assert_eq!(
            lines_text(&service(), &args).unwrap_err().to_string(),
            "no line info for frames matching 'Json.encode'"
        );
    }

    #[test]
    fn test_info_text_sections() {
        let args = InfoArgs {
            expand: 1,
            ..InfoArgs::default()
        };
        let out = info_text(&service(), &args);

        assert!(out.starts_with("=== THREADS (top 2) ===\n"));
        assert!(out.contains("=== RANK BY SELF TIME (top 3) ===\n"));
        assert!(out.contains("=== RANK BY TOTAL TIME (top 3) ===\n"));
        assert!(out.contains("\nTotal samples: 10\n"));
        assert!(out.contains("\n=== DRILL-DOWN: Db.query (self=60.0%) ===\n"));
        assert!(out.contains("--- tree (callees) ---\n[60.0%] Db.query  ← self=60.0%\n"));
        assert!(out.contains("--- callers ---\n[60.0%] Db.query\n  [60.0%] Main.main\n"));
        assert!(out.ends_with(&format!(
            "--- lines ---\n{}:{:<8} {:>8} {:>6.1}%\n",
            "Db.query", 88, 6, 60.0
        )));
        assert!(!out.contains("DRILL-DOWN: Json.encode"));
    }

    #[test]
    fn test_info_text_without_expand() {
        let args = InfoArgs {
            expand: 0,
            ..InfoArgs::default()
        };
        let out = info_text(&service(), &args);
        assert!(!out.contains("DRILL-DOWN"));
        assert!(out.ends_with("\nTotal samples: 10\n"));
    }
}
