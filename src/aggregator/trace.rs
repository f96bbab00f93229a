//! Greedy hot-path tracing.
//!
//! Starting from a root of a descendant tree, repeatedly descend into the
//! heaviest child until no child reaches `min_pct`. Children below the
//! threshold are ignored entirely: they neither count as siblings nor get
//! chosen.

use super::path_tree::{NodeId, PathTree};

/// The runner-up at a branch point
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingHint {
    /// Number of qualifying siblings of the chosen child
    pub count: usize,
    pub next_name: String,
    pub next_pct: f64,
}

/// One node on the hot path
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep {
    pub indent: usize,
    pub name: String,
    pub pct: f64,
    /// Set when this node was chosen over other qualifying siblings
    pub siblings: Option<SiblingHint>,
    /// Self-time on the final step, when nonzero and >= min_pct
    pub self_pct: Option<f64>,
}

/// Hot path from one root
#[derive(Debug, Clone, PartialEq)]
pub struct HotPath {
    pub steps: Vec<TraceStep>,
    /// Name and self% of the final node; None if the root itself was pruned
    pub leaf: Option<(String, f64)>,
}

/// Trace the hot path from every root, heaviest root first
pub fn trace_hot_paths(tree: &PathTree, min_pct: f64) -> Vec<HotPath> {
    tree.roots_by_weight()
        .into_iter()
        .map(|root| trace_from(tree, root, min_pct))
        .collect()
}

/// Direct children at or above `min_pct`, heaviest first, ties by name
pub fn qualifying_children(tree: &PathTree, id: NodeId, min_pct: f64) -> Vec<NodeId> {
    tree.children_by_weight(id)
        .into_iter()
        .filter(|&child| tree.pct(tree.node(child).total) >= min_pct)
        .collect()
}

/// Follow the heaviest qualifying child from `root` down to a leaf
pub fn trace_from(tree: &PathTree, root: NodeId, min_pct: f64) -> HotPath {
    let mut steps = Vec::new();
    let mut current = root;
    let mut siblings: Option<SiblingHint> = None;

    loop {
        let node = tree.node(current);
        let pct = tree.pct(node.total);
        if pct < min_pct {
            return HotPath { steps, leaf: None };
        }

        let children = qualifying_children(tree, current, min_pct);
        let indent = steps.len();

        let Some(&hottest) = children.first() else {
            let leaf_self = tree.pct(node.self_weight);
            let self_pct = (node.self_weight > 0 && leaf_self >= min_pct).then_some(leaf_self);
            steps.push(TraceStep {
                indent,
                name: node.name.clone(),
                pct,
                siblings: siblings.take(),
                self_pct,
            });
            return HotPath {
                steps,
                leaf: Some((node.name.clone(), leaf_self)),
            };
        };

        steps.push(TraceStep {
            indent,
            name: node.name.clone(),
            pct,
            siblings: siblings.take(),
            self_pct: None,
        });

        siblings = children.get(1).map(|&next| SiblingHint {
            count: children.len() - 1,
            next_name: tree.node(next).name.clone(),
            next_pct: tree.pct(tree.node(next).total),
        });
        current = hottest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{SampleSet, Stack};

    #[test]
    fn test_trace_branch_annotation() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["A.a", "B.b"], 70),
            Stack::new(["A.a", "C.c"], 30),
        ]);
        let tree = PathTree::descendants(&set, "A.a");
        let paths = trace_hot_paths(&tree, 0.0);
        assert_eq!(paths.len(), 1);

        let path = &paths[0];
        assert_eq!(path.steps.len(), 2);
        assert_eq!(path.steps[0].name, "A.a");
        assert_eq!(path.steps[0].siblings, None);
        assert_eq!(path.steps[1].name, "B.b");
        assert_eq!(
            path.steps[1].siblings,
            Some(SiblingHint {
                count: 1,
                next_name: "C.c".to_string(),
                next_pct: 30.0,
            })
        );
        assert_eq!(path.steps[1].self_pct, Some(70.0));
        assert_eq!(path.leaf, Some(("B.b".to_string(), 70.0)));
    }

    #[test]
    fn test_trace_ignores_children_below_threshold() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["A.a", "B.b", "C.c"], 1),
            Stack::new(["A.a", "B.b"], 99),
        ]);
        let tree = PathTree::descendants(&set, "A.a");
        let path = trace_from(&tree, tree.find("A.a").unwrap(), 5.0);

        let names: Vec<&str> = path.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A.a", "B.b"]);
        assert_eq!(path.steps[1].siblings, None);
        assert_eq!(path.leaf, Some(("B.b".to_string(), 99.0)));
    }

    #[test]
    fn test_trace_tie_break_prefers_smaller_name() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["R.r", "Y.y"], 50),
            Stack::new(["R.r", "X.x"], 50),
        ]);
        let tree = PathTree::descendants(&set, "R.r");
        let path = trace_from(&tree, tree.find("R.r").unwrap(), 0.0);

        assert_eq!(path.steps[1].name, "X.x");
        let hint = path.steps[1].siblings.as_ref().unwrap();
        assert_eq!(hint.next_name, "Y.y");
        assert_eq!(hint.count, 1);
    }

    #[test]
    fn test_trace_pruned_root() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["A.a"], 1),
            Stack::new(["B.b"], 99),
        ]);
        let tree = PathTree::from_root(&set);
        let path = trace_from(&tree, tree.find("A.a").unwrap(), 5.0);
        assert!(path.steps.is_empty());
        assert_eq!(path.leaf, None);
    }

    #[test]
    fn test_roots_ordered_by_weight() {
        let set = SampleSet::from_stacks(vec![
            Stack::new(["Work.small", "X.x"], 10),
            Stack::new(["Work.big", "Y.y"], 40),
        ]);
        let tree = PathTree::descendants(&set, "Work.");
        let paths = trace_hot_paths(&tree, 0.0);
        assert_eq!(paths[0].steps[0].name, "Work.big");
        assert_eq!(paths[1].steps[0].name, "Work.small");
    }
}
