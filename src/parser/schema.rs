//! Normalized sample model shared by every query.
//!
//! A profiling run is a set of weighted, de-duplicated call stacks.
//! Decoders build a [`SampleSet`] once; queries only ever borrow it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One weighted call path (root first, leaf last)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// Frame identifiers, root first
    pub frames: Vec<String>,

    /// Source line per frame, parallel to `frames` (0 = unknown)
    pub lines: Vec<u32>,

    /// Number of profiling events collapsed into this stack
    pub count: u64,

    /// Thread label, empty when the input had no thread information
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thread: String,
}

impl Stack {
    /// Create a stack with unknown lines and no thread label
    pub fn new<S: Into<String>>(frames: impl IntoIterator<Item = S>, count: u64) -> Self {
        let frames: Vec<String> = frames.into_iter().map(Into::into).collect();
        let lines = vec![0; frames.len()];
        Self {
            frames,
            lines,
            count,
            thread: String::new(),
        }
    }

    /// Attach per-frame line numbers; padded or truncated to the frame count
    pub fn with_lines(mut self, mut lines: Vec<u32>) -> Self {
        lines.resize(self.frames.len(), 0);
        self.lines = lines;
        self
    }

    pub fn with_thread(mut self, thread: impl Into<String>) -> Self {
        self.thread = thread.into();
        self
    }

    /// Leaf (last) frame
    pub fn leaf(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    fn is_valid(&self) -> bool {
        !self.frames.is_empty() && self.count > 0 && self.frames.len() == self.lines.len()
    }
}

/// The whole profiling run.
///
/// `total_samples` always equals the sum of every stack's `count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleSet {
    stacks: Vec<Stack>,
    total_samples: u64,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sample set, dropping stacks that violate the model invariants
    pub fn from_stacks(stacks: impl IntoIterator<Item = Stack>) -> Self {
        let mut set = Self::new();
        for stack in stacks {
            set.push(stack);
        }
        set
    }

    /// Append a stack. Empty or zero-weight stacks are ignored, as is a
    /// stack whose count would overflow the running total.
    pub fn push(&mut self, stack: Stack) {
        if !stack.is_valid() {
            debug!(
                "Dropping invalid stack ({} frames, {} lines, count {})",
                stack.frames.len(),
                stack.lines.len(),
                stack.count
            );
            return;
        }
        let Some(total) = self.total_samples.checked_add(stack.count) else {
            warn!(
                "Dropping stack with count {}: total samples would overflow",
                stack.count
            );
            return;
        };
        self.total_samples = total;
        self.stacks.push(stack);
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn is_empty(&self) -> bool {
        self.total_samples == 0
    }

    /// New sample set holding only stacks whose thread label contains `thread`.
    ///
    /// An empty filter returns a copy of the whole set.
    pub fn filter_by_thread(&self, thread: &str) -> SampleSet {
        if thread.is_empty() {
            return self.clone();
        }
        let filtered = Self::from_stacks(
            self.stacks
                .iter()
                .filter(|s| s.thread.contains(thread))
                .cloned(),
        );
        debug!(
            "Thread filter '{}' kept {} of {} stacks",
            thread,
            filtered.stacks.len(),
            self.stacks.len()
        );
        filtered
    }
}
