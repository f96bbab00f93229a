//! Plain-text rendering of query results.
//!
//! Every renderer returns a `String` ending in a newline (or an empty
//! string when there is nothing to show) so commands can print it as-is
//! and tests can compare it directly.

use crate::aggregator::metrics::{
    percentage, HotEntry, HotRanking, LineEntry, LinesReport, ThreadEntry, ThreadReport,
};
use crate::aggregator::names::truncate_len;
use crate::aggregator::path_tree::PathTree;
use crate::aggregator::trace::{trace_hot_paths, HotPath, SiblingHint};
use std::fmt::Write;

/// Notice printed when a pattern matched no frame
pub fn no_match_notice(pattern: &str) -> String {
    format!("no frames matching '{}'\n", pattern)
}

/// `# matched N methods: a, b` when more than one short name matched
fn matched_header(tree: &PathTree) -> String {
    let names = tree.matched_names();
    if names.len() > 1 {
        format!("# matched {} methods: {}\n", names.len(), names.join(", "))
    } else {
        String::new()
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn self_suffix(self_pct: Option<f64>) -> String {
    self_pct
        .map(|pct| format!("  ← self={:.1}%", pct))
        .unwrap_or_default()
}

/// Render a callee or caller tree
///
/// **Public** - used by the tree, callers and info commands
///
/// # Arguments
/// * `tree` - Aggregated path tree
/// * `pattern` - The method pattern, echoed in the no-match notice
/// * `max_depth` - Levels to render (roots are level 1)
/// * `min_pct` - Prune nodes below this share of all samples
/// * `show_self` - Annotate rows with their self time
pub fn render_tree(
    tree: &PathTree,
    pattern: &str,
    max_depth: usize,
    min_pct: f64,
    show_self: bool,
) -> String {
    if tree.is_empty() {
        return no_match_notice(pattern);
    }

    let mut out = matched_header(tree);
    for row in tree.rows(max_depth, min_pct, show_self) {
        let _ = writeln!(
            out,
            "{}[{:.1}%] {}{}",
            indent(row.indent),
            row.pct,
            row.name,
            self_suffix(row.self_pct)
        );
    }
    out
}

/// Render the greedy hot path from every matched root
pub fn render_trace(tree: &PathTree, pattern: &str, min_pct: f64) -> String {
    if tree.is_empty() {
        return no_match_notice(pattern);
    }

    let mut out = matched_header(tree);
    for path in trace_hot_paths(tree, min_pct) {
        out.push_str(&render_hot_path(&path));
    }
    out
}

fn render_hot_path(path: &HotPath) -> String {
    let mut out = String::new();
    for step in &path.steps {
        let _ = writeln!(
            out,
            "{}[{:.1}%] {}{}{}",
            indent(step.indent),
            step.pct,
            step.name,
            step.siblings.as_ref().map(sibling_annotation).unwrap_or_default(),
            self_suffix(step.self_pct)
        );
    }
    if let Some((name, self_pct)) = &path.leaf {
        let _ = writeln!(out, "Hottest leaf: {} (self={:.1}%)", name, self_pct);
    }
    out
}

fn sibling_annotation(hint: &SiblingHint) -> String {
    let word = if hint.count == 1 { "sibling" } else { "siblings" };
    format!(
        "  (+{} {}, next: {:.1}% {})",
        hint.count, word, hint.next_pct, hint.next_name
    )
}

/// Render both hot-method tables
///
/// With `show_top_n`, section titles carry the number of rows shown.
pub fn render_hot(ranking: &HotRanking, show_top_n: bool) -> String {
    if ranking.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&render_hot_table(
        "RANK BY SELF TIME",
        &ranking.by_self,
        ranking.total_samples,
        show_top_n,
        |e| e.self_count,
    ));
    out.push('\n');
    out.push_str(&render_hot_table(
        "RANK BY TOTAL TIME",
        &ranking.by_total,
        ranking.total_samples,
        show_top_n,
        |e| e.total_count,
    ));
    out
}

fn render_hot_table(
    title: &str,
    entries: &[HotEntry],
    total: u64,
    show_top_n: bool,
    samples: impl Fn(&HotEntry) -> u64,
) -> String {
    let mut out = if show_top_n {
        format!("=== {} (top {}) ===\n", title, entries.len())
    } else {
        format!("=== {} ===\n", title)
    };
    let _ = writeln!(
        out,
        "{:<50} {:>7} {:>7} {:>9}",
        "METHOD", "SELF%", "TOTAL%", "SAMPLES"
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<50} {:>6.1}% {:>6.1}% {:>9}",
            entry.name,
            percentage(entry.self_count, total),
            percentage(entry.total_count, total),
            samples(entry)
        );
    }
    out
}

/// Render the thread table, `top` named threads (0 = all) plus the
/// unlabelled bucket last
pub fn render_threads(report: &ThreadReport, top: usize) -> String {
    if !report.has_thread_info() {
        return if report.total_samples > 0 {
            "no thread info in this file\n".to_string()
        } else {
            String::new()
        };
    }

    let mut out = format!("{:<30} {:>9} {:>7}\n", "THREAD", "SAMPLES", "PCT");
    let shown = &report.ranked[..truncate_len(report.ranked.len(), top)];
    let no_thread = report.no_thread_entry();
    for entry in shown.iter().chain(no_thread.as_ref()) {
        out.push_str(&thread_row(entry, report.total_samples));
    }
    out
}

/// One `NAME SAMPLES PCT` thread row
pub fn thread_row(entry: &ThreadEntry, total: u64) -> String {
    format!(
        "{:<30} {:>9} {:>6.1}%\n",
        entry.name,
        entry.samples,
        percentage(entry.samples, total)
    )
}

/// Render a lines query result
pub fn render_lines(report: &LinesReport, pattern: &str, total: u64) -> String {
    let entries = match report {
        LinesReport::NoMatch => return no_match_notice(pattern),
        LinesReport::Lines(entries) if entries.is_empty() => return String::new(),
        LinesReport::Lines(entries) => entries,
    };

    let mut out = format!("{:<40} {:>9} {:>7}\n", "SOURCE:LINE", "SAMPLES", "PCT");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<40} {:>9} {:>6.1}%",
            source_location(entry),
            entry.samples,
            percentage(entry.samples, total)
        );
    }
    out
}

fn source_location(entry: &LineEntry) -> String {
    format!("{}:{}", entry.name, entry.line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::metrics::{compute_lines, compute_threads, rank_hot};
    use crate::parser::schema::{SampleSet, Stack};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_tree_with_self() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["A.a", "B.b"], 70),
            Stack::new(["A.a", "C.c"], 30),
        ]);
        let tree = PathTree::descendants(&set, "A.a");
        assert_eq!(
            render_tree(&tree, "A.a", 4, 1.0, true),
            "[100.0%] A.a\n  [70.0%] B.b  ← self=70.0%\n  [30.0%] C.c  ← self=30.0%\n"
        );
    }

    #[test]
    fn test_render_tree_no_match() {
        let set = SampleSet::from_stacks(vec![Stack::new(["A.a"], 1)]);
        let tree = PathTree::descendants(&set, "Zzz");
        assert_eq!(render_tree(&tree, "Zzz", 4, 1.0, true), "no frames matching 'Zzz'\n");
    }

    #[test]
    fn test_render_tree_matched_header() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["Svc.read", "Io.poll"], 6),
            Stack::new(["Svc.readAll"], 4),
        ]);
        let tree = PathTree::descendants(&set, "Svc.read");
        let out = render_tree(&tree, "Svc.read", 4, 0.0, false);
        assert!(out.starts_with("# matched 2 methods: Svc.read, Svc.readAll\n"));
    }

    #[test]
    fn test_render_trace() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["A.a", "B.b"], 70),
            Stack::new(["A.a", "C.c"], 30),
        ]);
        let tree = PathTree::descendants(&set, "A.a");
        assert_eq!(
            render_trace(&tree, "A.a", 0.0),
            "[100.0%] A.a\n  [70.0%] B.b  (+1 sibling, next: 30.0% C.c)  ← self=70.0%\n\
             Hottest leaf: B.b (self=70.0%)\n"
        );
    }

    #[test]
    fn test_render_hot() {
        let set = SampleSet::from_stacks(vec![Stack::new(["A.a", "B.b"], 3), Stack::new(["A.a"], 1)]);
        let ranking = rank_hot(&set, false, 10);
        let header = format!("{:<50} {:>7} {:>7} {:>9}\n", "METHOD", "SELF%", "TOTAL%", "SAMPLES");
        let expected = format!(
            "=== RANK BY SELF TIME ===\n{h}{:<50} {:>6.1}% {:>6.1}% {:>9}\n{:<50} {:>6.1}% {:>6.1}% {:>9}\n\n\
             === RANK BY TOTAL TIME ===\n{h}{:<50} {:>6.1}% {:>6.1}% {:>9}\n{:<50} {:>6.1}% {:>6.1}% {:>9}\n",
            "B.b", 75.0, 75.0, 3,
            "A.a", 25.0, 100.0, 1,
            "A.a", 25.0, 100.0, 4,
            "B.b", 75.0, 75.0, 3,
            h = header
        );
        assert_eq!(render_hot(&ranking, false), expected);
        assert!(render_hot(&ranking, true).starts_with("=== RANK BY SELF TIME (top 2) ===\n"));
    }

    #[test]
    fn test_render_threads() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["A"], 6).with_thread("main"),
            Stack::new(["B"], 2),
            Stack::new(["C"], 2).with_thread("gc"),
        ]);
        let out = render_threads(&compute_threads(&set), 0);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("THREAD"));
        assert!(lines[1].starts_with("main"));
        assert!(lines[2].starts_with("gc"));
        assert!(lines[3].starts_with("(no thread info)"));
        assert!(lines[3].ends_with(" 20.0%"));

        let unlabelled = SampleSet::from_stacks(vec![Stack::new(["A"], 1)]);
        assert_eq!(
            render_threads(&compute_threads(&unlabelled), 0),
            "no thread info in this file\n"
        );
        assert_eq!(render_threads(&compute_threads(&SampleSet::new()), 0), "");
    }

    #[test]
    fn test_render_lines() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["M.run", "M.loop"], 3).with_lines(vec![0, 42]),
        ]);
        let report = compute_lines(&set, "M.loop", 0, false).unwrap();
        assert_eq!(
            render_lines(&report, "M.loop", 3),
            format!(
                "{:<40} {:>9} {:>7}\n{:<40} {:>9} {:>6.1}%\n",
                "SOURCE:LINE", "SAMPLES", "PCT", "M.loop:42", 3, 100.0
            )
        );
        assert_eq!(
            render_lines(&LinesReport::NoMatch, "X", 3),
            "no frames matching 'X'\n"
        );
    }
}
