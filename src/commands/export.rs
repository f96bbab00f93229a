//! Export commands: collapsed text and SVG flamegraphs.

use super::models::{FilterArgs, FlamegraphArgs, InputArgs};
use super::utils::load_samples;
use crate::flamegraph::generate_flamegraph;
use crate::output::collapsed::{collapsed_lines, filtered_lines, to_text};
use crate::output::svg::write_svg;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the collapse command: re-emit every stack as collapsed text
pub fn execute_collapse(input: InputArgs) -> Result<()> {
    let set = load_samples(&input)?;
    print!("{}", to_text(&collapsed_lines(&set)));
    Ok(())
}

/// Execute the filter command: emit only stacks through a matching frame
pub fn execute_filter(args: FilterArgs) -> Result<()> {
    let set = load_samples(&args.input)?;
    print!(
        "{}",
        to_text(&filtered_lines(&set, &args.method, args.include_callers))
    );
    Ok(())
}

/// Execute the flamegraph command
///
/// # Errors
/// * Input read failures
/// * `FlamegraphError::EmptyStacks` when no stacks survive the thread filter
/// * SVG write failures
pub fn execute_flamegraph(args: FlamegraphArgs) -> Result<()> {
    let start_time = Instant::now();
    let set = load_samples(&args.input)?;

    let svg = generate_flamegraph(&set, Some(&args.config))
        .context("Failed to generate flamegraph")?;
    write_svg(&svg, &args.output).context("Failed to write flamegraph SVG")?;

    info!(
        "Flamegraph written to {} in {:.2?}",
        args.output.display(),
        start_time.elapsed()
    );
    Ok(())
}
