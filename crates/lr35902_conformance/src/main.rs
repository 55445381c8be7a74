use anyhow::Result;

use lr35902_conformance::{run_all, suite};

fn main() -> Result<()> {
    env_logger::init();

    let cases = suite::all();
    let passed = run_all(&cases)?;
    println!("{passed} conformance cases passed");
    Ok(())
}
