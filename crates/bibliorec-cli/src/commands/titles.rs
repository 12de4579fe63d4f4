//! Titles command implementation
//!
//! Lists every title that can be used as a recommendation query.

use super::validate_artifacts_dir;
use crate::error::Result;
use bibliorec::artifacts::{self, PIVOT_FILE};
use std::path::Path;

/// Run the titles command
pub(crate) fn run(dir: &Path, limit: Option<usize>, json_output: bool) -> Result<()> {
    validate_artifacts_dir(dir)?;
    let store = artifacts::load_store(dir.join(PIVOT_FILE))?;
    let shown = limit.unwrap_or(store.len()).min(store.len());
    let titles = &store.identities()[..shown];

    if json_output {
        println!("{}", serde_json::to_string_pretty(titles)?);
    } else {
        for title in titles {
            println!("{title}");
        }
    }
    Ok(())
}
