use super::models::InputArgs;
use crate::parser::{open_input, SampleSet};
use anyhow::{Context, Result};
use log::debug;

/// Open an input and apply the thread filter
pub fn load_samples(input: &InputArgs) -> Result<SampleSet> {
    let set = open_input(&input.path)
        .with_context(|| format!("Failed to read profile {}", input.path.display()))?;

    debug!(
        "Loaded {} stacks, {} samples from {}",
        set.stacks().len(),
        set.total_samples(),
        input.path.display()
    );

    Ok(match input.thread.as_deref() {
        Some(thread) => set.filter_by_thread(thread),
        None => set,
    })
}
