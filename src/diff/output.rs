//! Terminal output rendering for diff reports.
//!
//! Four fixed sections, each omitted when empty.

use super::schema::{DiffEntry, DiffReport};

/// Render a human-readable summary of a diff report for the terminal
pub fn render_terminal_diff(report: &DiffReport) -> String {
    if report.is_unchanged() {
        return "no significant changes\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&render_section("REGRESSION", &report.regressions, render_change));
    out.push_str(&render_section("IMPROVEMENT", &report.improvements, render_change));
    out.push_str(&render_section("NEW", &report.new, |e| render_share(e, e.after)));
    out.push_str(&render_section("GONE", &report.gone, |e| render_share(e, e.before)));
    out
}

fn render_section(title: &str, entries: &[DiffEntry], row: impl Fn(&DiffEntry) -> String) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", title);
    for entry in entries {
        out.push_str(&row(entry));
        out.push('\n');
    }
    out
}

fn render_change(entry: &DiffEntry) -> String {
    let delta = if entry.delta > 0.0 {
        format!("(+{:.1}%)", entry.delta)
    } else {
        format!("({:.1}%)", entry.delta)
    };
    format!(
        "  {:<50} {:>5.1}% -> {:>5.1}%  {}",
        entry.name, entry.before, entry.after, delta
    )
}

fn render_share(entry: &DiffEntry, pct: f64) -> String {
    format!("  {:<50} {:.1}%", entry.name, pct)
}
