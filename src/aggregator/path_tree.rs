//! Path aggregation into a virtual call tree.
//!
//! Every stack contributes one extracted path of short names. Each prefix
//! of that path is a tree node:
//! - `total` is the sum of counts of every stack whose path passes through
//!   (or ends at) the node
//! - `self_weight` is the sum of counts of stacks whose path ends exactly there
//!
//! Nodes live in an arena and are addressed by index; children are kept as
//! index lists so enumeration never scans the whole tree.

use super::names::{display_name, matches_method, short_name};
use crate::parser::schema::{SampleSet, Stack};
use crate::utils::config::PATH_DELIMITER;
use log::debug;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Index of a node in the arena
pub type NodeId = usize;

/// How a path is extracted from each stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Whole stack, root to leaf, no matching step
    Unfiltered,
    /// First matching frame down to the leaf
    Descendants,
    /// First matching frame up to the root (matched frame first)
    Ancestors,
}

/// One node of the virtual tree
#[derive(Debug, Clone)]
pub struct PathNode {
    pub name: String,
    pub total: u64,
    pub self_weight: u64,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Aggregated path tree for a single query
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    nodes: Vec<PathNode>,
    roots: Vec<NodeId>,
    root_index: HashMap<String, NodeId>,
    child_index: HashMap<(NodeId, String), NodeId>,
    matched_names: BTreeSet<String>,
    total_samples: u64,
}

/// One rendered row of a tree/callers view
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    /// Indentation level (0 for roots)
    pub indent: usize,
    pub name: String,
    pub pct: f64,
    /// Self-time percentage, present only when shown
    pub self_pct: Option<f64>,
}

impl PathTree {
    /// Aggregate every stack from its root, with no pattern
    pub fn from_root(set: &SampleSet) -> Self {
        Self::build(set, PathMode::Unfiltered, "", false)
    }

    /// Aggregate callees of the first frame matching `pattern` in each stack
    pub fn descendants(set: &SampleSet, pattern: &str) -> Self {
        Self::build(set, PathMode::Descendants, pattern, false)
    }

    /// Aggregate callers of the first frame matching `pattern` in each stack
    pub fn ancestors(set: &SampleSet, pattern: &str) -> Self {
        Self::build(set, PathMode::Ancestors, pattern, false)
    }

    /// Aggregate with an explicit mode.
    ///
    /// With `fqn`, node names are fully-qualified instead of short. Matched
    /// names are always reported in short form.
    pub fn build(set: &SampleSet, mode: PathMode, pattern: &str, fqn: bool) -> Self {
        let mut tree = Self {
            total_samples: set.total_samples(),
            ..Self::default()
        };

        for stack in set.stacks() {
            if let Some(path) = tree.extract_path(stack, mode, pattern, fqn) {
                tree.insert_path(&path, stack.count);
            }
        }

        debug!(
            "Aggregated {} stacks into {} nodes ({} roots, {} matched names)",
            set.stacks().len(),
            tree.nodes.len(),
            tree.roots.len(),
            tree.matched_names.len()
        );

        tree
    }

    fn extract_path(
        &mut self,
        stack: &Stack,
        mode: PathMode,
        pattern: &str,
        fqn: bool,
    ) -> Option<Vec<String>> {
        let name = |frame: &String| display_name(frame, fqn);

        if mode == PathMode::Unfiltered {
            return Some(stack.frames.iter().map(name).collect());
        }

        let idx = stack
            .frames
            .iter()
            .position(|frame| matches_method(frame, pattern))?;
        self.matched_names.insert(short_name(&stack.frames[idx]));

        let path = match mode {
            PathMode::Ancestors => stack.frames[..=idx].iter().rev().map(name).collect(),
            _ => stack.frames[idx..].iter().map(name).collect(),
        };
        Some(path)
    }

    fn insert_path(&mut self, path: &[String], count: u64) {
        let mut parent: Option<NodeId> = None;
        for segment in path {
            let id = self.child_or_insert(parent, segment);
            self.nodes[id].total += count;
            parent = Some(id);
        }
        if let Some(leaf) = parent {
            self.nodes[leaf].self_weight += count;
        }
    }

    fn child_or_insert(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let existing = match parent {
            None => self.root_index.get(name),
            Some(p) => self.child_index.get(&(p, name.to_string())),
        };
        if let Some(&id) = existing {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(PathNode {
            name: name.to_string(),
            total: 0,
            self_weight: 0,
            parent,
            children: Vec::new(),
        });
        match parent {
            None => {
                self.roots.push(id);
                self.root_index.insert(name.to_string(), id);
            }
            Some(p) => {
                self.nodes[p].children.push(id);
                self.child_index.insert((p, name.to_string()), id);
            }
        }
        id
    }

    /// True when no stack contributed a path
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Distinct short names that satisfied the pattern, sorted
    pub fn matched_names(&self) -> Vec<&str> {
        self.matched_names.iter().map(String::as_str).collect()
    }

    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Percentage of all samples
    pub fn pct(&self, weight: u64) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            100.0 * weight as f64 / self.total_samples as f64
        }
    }

    /// Look up a node by its `;`-joined path key
    pub fn find(&self, key: &str) -> Option<NodeId> {
        let mut segments = key.split(PATH_DELIMITER);
        let mut id = *self.root_index.get(segments.next()?)?;
        for segment in segments {
            id = *self.child_index.get(&(id, segment.to_string()))?;
        }
        Some(id)
    }

    /// `;`-joined path key of a node
    pub fn path_key(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            segments.push(self.nodes[node_id].name.as_str());
            current = self.nodes[node_id].parent;
        }
        segments.reverse();
        segments.join(&PATH_DELIMITER.to_string())
    }

    /// Roots in lexicographic name order
    pub fn roots_by_name(&self) -> Vec<NodeId> {
        let mut roots = self.roots.clone();
        roots.sort_by(|&a, &b| self.nodes[a].name.cmp(&self.nodes[b].name));
        roots
    }

    /// Roots by total weight descending, name ascending
    pub fn roots_by_weight(&self) -> Vec<NodeId> {
        let mut roots = self.roots.clone();
        roots.sort_by(|&a, &b| self.heavier_first(a, b));
        roots
    }

    /// Direct children by total weight descending, name ascending
    pub fn children_by_weight(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.nodes[id].children.clone();
        children.sort_by(|&a, &b| self.heavier_first(a, b));
        children
    }

    fn heavier_first(&self, a: NodeId, b: NodeId) -> Ordering {
        let (a, b) = (&self.nodes[a], &self.nodes[b]);
        b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name))
    }

    /// Depth-first rows for a tree/callers view.
    ///
    /// Nodes below `min_pct` are pruned with their subtree; recursion stops
    /// once `max_depth` levels (roots are level 1) have been emitted. With
    /// `show_self`, rows carry a self-time percentage when it is nonzero
    /// and at least `min_pct`.
    pub fn rows(&self, max_depth: usize, min_pct: f64, show_self: bool) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut work: Vec<(NodeId, usize)> = self
            .roots_by_name()
            .into_iter()
            .rev()
            .map(|id| (id, 1))
            .collect();

        while let Some((id, depth)) = work.pop() {
            let node = &self.nodes[id];
            let pct = self.pct(node.total);
            if pct < min_pct {
                continue;
            }

            let self_pct = if show_self && node.self_weight > 0 {
                Some(self.pct(node.self_weight)).filter(|&p| p >= min_pct)
            } else {
                None
            };

            rows.push(TreeRow {
                indent: depth - 1,
                name: node.name.clone(),
                pct,
                self_pct,
            });

            if depth >= max_depth {
                continue;
            }
            for child in self.children_by_weight(id).into_iter().rev() {
                work.push((child, depth + 1));
            }
        }

        rows
    }
}
