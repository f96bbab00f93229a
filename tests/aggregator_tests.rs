use ap_query::aggregator::metrics::{compute_hot, compute_lines, rank_hot, LinesReport};
use ap_query::aggregator::path_tree::PathTree;
use ap_query::aggregator::trace::trace_hot_paths;
use ap_query::parser::{SampleSet, Stack};

fn abc_profile() -> SampleSet {
    SampleSet::from_stacks(vec![
        Stack::new(["app/A.a", "app/B.b", "app/C.c"], 10),
        Stack::new(["app/A.a", "app/B.b"], 5),
        Stack::new(["app/A.a", "app/D.d"], 3),
    ])
}

#[test]
fn test_hot_ranking_scenario() {
    let ranked = compute_hot(&abc_profile(), false);

    let by_self: Vec<(&str, u64)> = ranked
        .iter()
        .filter(|e| e.self_count > 0)
        .map(|e| (e.name.as_str(), e.self_count))
        .collect();
    assert_eq!(by_self, vec![("C.c", 10), ("B.b", 5), ("D.d", 3)]);

    let a = ranked.iter().find(|e| e.name == "A.a").unwrap();
    assert_eq!(a.self_count, 0);
    assert_eq!(a.total_count, 18);

    let ranking = rank_hot(&abc_profile(), false, 10);
    assert_eq!(ranking.by_total[0].name, "A.a");
}

#[test]
fn test_self_counts_sum_to_total_samples() {
    let set = SampleSet::from_stacks(vec![
        Stack::new(["R1.main", "X.work", "X.work"], 4),
        Stack::new(["R2.main", "Y.io"], 9),
        Stack::new(["R3.main"], 2),
    ]);
    let ranked = compute_hot(&set, false);

    let self_sum: u64 = ranked.iter().map(|e| e.self_count).sum();
    assert_eq!(self_sum, set.total_samples());

    let root_total: u64 = ranked
        .iter()
        .filter(|e| e.name.ends_with(".main"))
        .map(|e| e.total_count)
        .sum();
    assert_eq!(root_total, set.total_samples());
}

#[test]
fn test_descendant_root_weight_matches_stack_counts() {
    let set = SampleSet::from_stacks(vec![
        Stack::new(["Main.run", "Svc.handle", "Db.query"], 7),
        Stack::new(["Main.run", "Svc.handle"], 2),
        Stack::new(["Main.idle"], 5),
        Stack::new(["Worker.run", "Svc.handle", "Cache.get"], 4),
    ]);
    let tree = PathTree::descendants(&set, "Svc.handle");
    let root = tree.find("Svc.handle").unwrap();
    assert_eq!(tree.node(root).total, 13);
    assert_eq!(tree.node(root).self_weight, 2);
}

#[test]
fn test_recursive_subtree_weight() {
    // Prefix propagation counts every stack through a node, even when the
    // same name repeats further down.
    let set = SampleSet::from_stacks(vec![
        Stack::new(["R.f", "R.f", "Leaf.x"], 3),
        Stack::new(["R.f", "R.f"], 2),
    ]);
    let tree = PathTree::from_root(&set);
    assert_eq!(tree.node(tree.find("R.f").unwrap()).total, 5);
    assert_eq!(tree.node(tree.find("R.f;R.f").unwrap()).total, 5);
    assert_eq!(compute_hot(&set, false).iter().find(|e| e.name == "R.f").unwrap().total_count, 5);
}

#[test]
fn test_trace_scenarios() {
    let set = SampleSet::from_stacks(vec![
        Stack::new(["A.a", "B.b"], 70),
        Stack::new(["A.a", "C.c"], 30),
    ]);
    let paths = trace_hot_paths(&PathTree::descendants(&set, "A.a"), 0.0);
    assert_eq!(paths[0].leaf, Some(("B.b".to_string(), 70.0)));

    let set = SampleSet::from_stacks(vec![
        Stack::new(["A.a", "B.b", "C.c"], 1),
        Stack::new(["A.a", "B.b"], 99),
    ]);
    let paths = trace_hot_paths(&PathTree::descendants(&set, "A.a"), 5.0);
    assert_eq!(paths[0].steps.len(), 2);
    assert_eq!(paths[0].leaf, Some(("B.b".to_string(), 99.0)));
}

#[test]
fn test_lines_dedup_recursive_same_line() {
    let set = SampleSet::from_stacks(vec![
        Stack::new(["Q.sort", "Q.sort", "Q.sort"], 8).with_lines(vec![12, 12, 12]),
        Stack::new(["Q.sort"], 2).with_lines(vec![30]),
    ]);
    match compute_lines(&set, "Q.sort", 0, false).unwrap() {
        LinesReport::Lines(lines) => {
            assert_eq!(lines.len(), 2);
            assert_eq!((lines[0].line, lines[0].samples), (12, 8));
            assert_eq!((lines[1].line, lines[1].samples), (30, 2));
        }
        other => panic!("unexpected: {:?}", other),
    }
}
