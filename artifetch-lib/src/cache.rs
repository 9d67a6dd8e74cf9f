//! Remembers the id of the last downloaded artifact so an unchanged artifact
//! is not fetched twice. The cache file holds nothing but the decimal id.

use crate::error::Result;
use crate::github::Artifact;
use std::fs;
use std::path::Path;

/// True iff `cache_path` is given, exists, and holds exactly the id of `artifact`.
pub fn should_skip(artifact: &Artifact, cache_path: Option<&Path>) -> Result<bool> {
    let Some(path) = cache_path else {
        return Ok(false);
    };

    if !path.exists() {
        return Ok(false);
    }

    let recorded = fs::read(path)?;
    Ok(recorded == artifact.id.to_string().as_bytes())
}

/// Overwrites the cache file with the id of `artifact`. Only call this after the
/// download finished.
pub fn record(artifact: &Artifact, cache_path: Option<&Path>) -> Result<()> {
    if let Some(path) = cache_path {
        fs::write(path, artifact.id.to_string())?;
    }
    Ok(())
}
