//! Preset/expectation conformance cases for the LR35902 engine.
//!
//! A [`Case`] loads one instruction at a fixed origin, applies its presets
//! to a zeroed CPU and flat memory, steps once and checks every
//! expectation. [`suite`] holds the built-in fixtures.

mod case;
pub mod suite;

use anyhow::{bail, Result};

pub use case::{Case, Field, DEFAULT_ORIGIN};

/// Run every case and report all failures together.
///
/// Returns the number of cases that passed.
pub fn run_all(cases: &[Case]) -> Result<usize> {
    let mut failures = Vec::new();
    for case in cases {
        if let Err(err) = case.run() {
            failures.push(format!("{err:#}"));
        }
    }

    if !failures.is_empty() {
        bail!(
            "{} of {} cases failed:\n  {}",
            failures.len(),
            cases.len(),
            failures.join("\n  ")
        );
    }

    log::info!("{} cases passed", cases.len());
    Ok(cases.len())
}
