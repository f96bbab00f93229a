//! SVG flamegraph generation using the inferno library.
//!
//! Stacks are fed to inferno in collapsed form; thread labels become the
//! bottom frame so per-thread towers stay separate.

use crate::output::collapsed::collapsed_lines;
use crate::parser::schema::SampleSet;
use crate::utils::config::DEFAULT_FLAMEGRAPH_TITLE;
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Options};
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    /// Render icicle-style (roots at the top)
    pub inverted: bool,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_FLAMEGRAPH_TITLE.to_string(),
            inverted: false,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }
}

/// Generate an SVG flamegraph from a sample set
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - the sample set has no stacks
/// * `FlamegraphError::RenderFailed` - inferno failed to render
pub fn generate_flamegraph(
    set: &SampleSet,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if set.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", set.stacks().len());

    let lines = collapsed_lines(set);
    let mut options = Options::default();
    options.title = config.title;
    options.count_name = "samples".to_string();
    options.direction = if config.inverted {
        flamegraph::Direction::Inverted
    } else {
        flamegraph::Direction::Straight
    };

    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(String::from_utf8_lossy(&svg).into_owned())
}
