//! Headless Block Fit runner (default binary).
//!
//! Plays one seeded game with the placement planner and prints the final
//! snapshot as JSON on stdout. Configured through `BLOCKFIT_*` environment
//! variables (see `tui_blockfit::config`).

use anyhow::Result;

use tui_blockfit::config::RunConfig;
use tui_blockfit::runner;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    if config.verbose {
        eprintln!("[Config] {:?}", config);
    }

    let summary = runner::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
