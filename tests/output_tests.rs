use ap_query::aggregator::path_tree::{PathMode, PathTree};
use ap_query::commands::models::{LinesArgs, ThreadsArgs, TraceArgs, TreeArgs};
use ap_query::commands::query::{lines_text, threads_text, trace_text, tree_text};
use ap_query::diff::{generate_diff, render_terminal_diff};
use ap_query::output::{collapsed_lines, filtered_lines, render_tree};
use ap_query::parser::{parse_collapsed, SampleSet};
use pretty_assertions::assert_eq;

const SERVICE: &str = "\
[http-1];app/Server.serve;app/Handler.get;app/Db.query:41 30
[http-1];app/Server.serve;app/Handler.get;app/Db.query:57 10
[http-2];app/Server.serve;app/Handler.get;app/Json.write:12 20
[http-2];app/Server.serve;app/Handler.post;app/Db.query:41 25
app/Gc.collect 15
";

fn service() -> SampleSet {
    parse_collapsed(SERVICE.as_bytes()).unwrap()
}

#[test]
fn test_tree_output() {
    let args = TreeArgs {
        method: Some("Handler".to_string()),
        depth: 2,
        ..TreeArgs::default()
    };
    let expected = "\
# matched 2 methods: Handler.get, Handler.post
[60.0%] Handler.get
  [40.0%] Db.query  ← self=40.0%
  [20.0%] Json.write  ← self=20.0%
[25.0%] Handler.post
  [25.0%] Db.query  ← self=25.0%
";
    assert_eq!(tree_text(&service(), &args, PathMode::Descendants), expected);
}

#[test]
fn test_callers_output() {
    let args = TreeArgs {
        method: Some("Db.query".to_string()),
        ..TreeArgs::default()
    };
    let expected = "\
[65.0%] Db.query
  [40.0%] Handler.get
    [40.0%] Server.serve
  [25.0%] Handler.post
    [25.0%] Server.serve
";
    assert_eq!(tree_text(&service(), &args, PathMode::Ancestors), expected);
}

#[test]
fn test_trace_output() {
    let args = TraceArgs {
        method: "Server.serve".to_string(),
        ..TraceArgs::default()
    };
    let expected = "\
[85.0%] Server.serve
  [60.0%] Handler.get  (+1 sibling, next: 25.0% Handler.post)
    [40.0%] Db.query  (+1 sibling, next: 20.0% Json.write)  ← self=40.0%
Hottest leaf: Db.query (self=40.0%)
";
    assert_eq!(trace_text(&service(), &args), expected);
}

#[test]
fn test_trace_no_match() {
    let args = TraceArgs {
        method: "Nope".to_string(),
        ..TraceArgs::default()
    };
    assert_eq!(trace_text(&service(), &args), "no frames matching 'Nope'\n");
}

#[test]
fn test_lines_output() {
    let args = LinesArgs {
        method: "Db.query".to_string(),
        ..LinesArgs::default()
    };
    let expected = format!(
        "{:<40} {:>9} {:>7}\n{:<40} {:>9} {:>6.1}%\n{:<40} {:>9} {:>6.1}%\n",
        "SOURCE:LINE", "SAMPLES", "PCT", "Db.query:41", 55, 55.0, "Db.query:57", 10, 10.0
    );
    assert_eq!(lines_text(&service(), &args).unwrap(), expected);
}

#[test]
fn test_threads_output() {
    let expected = format!(
        "{:<30} {:>9} {:>7}\n{:<30} {:>9} {:>6.1}%\n{:<30} {:>9} {:>6.1}%\n{:<30} {:>9} {:>6.1}%\n",
        "THREAD", "SAMPLES", "PCT",
        "http-2", 45, 45.0,
        "http-1", 40, 40.0,
        "(no thread info)", 15, 15.0
    );
    assert_eq!(threads_text(&service(), &ThreadsArgs::default()), expected);

    let top_one = ThreadsArgs {
        top: 1,
        ..ThreadsArgs::default()
    };
    assert_eq!(threads_text(&service(), &top_one).lines().count(), 3);
}

#[test]
fn test_whole_profile_tree_roots_sorted_by_name() {
    let tree = PathTree::from_root(&service());
    let out = render_tree(&tree, "", 1, 0.0, true);
    assert_eq!(out, "[15.0%] Gc.collect  ← self=15.0%\n[85.0%] Server.serve\n");
}

#[test]
fn test_diff_output_between_profiles() {
    let before = service();
    let after = parse_collapsed(
        "\
app/Server.serve;app/Handler.get;app/Db.query 20
app/Server.serve;app/Handler.get;app/Json.write 60
app/Cache.load 20
"
        .as_bytes(),
    )
    .unwrap();

    let expected = format!(
        "REGRESSION\n  {:<50}  20.0% ->  60.0%  (+40.0%)\n\
         IMPROVEMENT\n  {:<50}  65.0% ->  20.0%  (-45.0%)\n\
         NEW\n  {:<50} 20.0%\n\
         GONE\n  {:<50} 15.0%\n",
        "Json.write", "Db.query", "Cache.load", "Gc.collect"
    );
    assert_eq!(
        render_terminal_diff(&generate_diff(&before, &after, 0.5, 0, false)),
        expected
    );
}

#[test]
fn test_collapse_and_filter_output() {
    let set = service();
    assert_eq!(collapsed_lines(&set)[0], "[http-1];app/Server.serve;app/Handler.get;app/Db.query 30");
    assert_eq!(collapsed_lines(&set)[4], "app/Gc.collect 15");

    let filtered = filtered_lines(&set, "Handler.post", false);
    assert_eq!(filtered, vec!["[http-2];app/Handler.post;app/Db.query 25"]);
}
