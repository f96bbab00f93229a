//! Diff command implementation.
//! Compares self-time shares of two profiles and reports the changes.

use super::models::DiffArgs;
use super::utils::load_samples;
use crate::diff::{generate_diff, render_terminal_diff};
use crate::output::json::{render_json, write_json};
use anyhow::{Context, Result};
use log::info;

/// Execute the diff command
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    // Step 1: Load profiles
    let before = load_samples(&args.before).context("Failed to load baseline profile")?;
    let after = load_samples(&args.after).context("Failed to load comparison profile")?;

    if before.is_empty() && after.is_empty() {
        return Ok(());
    }

    // Step 2: Generate diff
    let report = generate_diff(&before, &after, args.min_delta, args.top, args.fqn);

    // Step 3: Report
    if args.json {
        match &args.output {
            Some(path) => {
                write_json(&report, path).context("Failed to write diff report JSON")?;
                info!("Diff report written to {}", path.display());
            }
            None => println!("{}", render_json(&report)?),
        }
    } else {
        print!("{}", render_terminal_diff(&report));
    }

    Ok(())
}
