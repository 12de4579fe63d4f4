pub(crate) mod recommend;
pub(crate) mod titles;

use crate::error::{CliError, Result};
use std::path::Path;

/// Fail early with a clear message when the artifact directory is missing.
pub(crate) fn validate_artifacts_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(CliError::ArtifactsNotFound(dir.to_path_buf()));
    }
    Ok(())
}
