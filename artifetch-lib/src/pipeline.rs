use crate::api_client::ApiClient;
use crate::cache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::Artifact;
use crate::selector::{ArtifactScope, find_artifact, find_latest_successful_run};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was written to `path`
    Downloaded {
        artifact: Artifact,
        path: PathBuf,
        bytes: u64,
    },
    /// The cache file already names this artifact; nothing was downloaded
    AlreadyDownloaded { artifact: Artifact },
}

/// Resolves the artifact described by `config` and downloads it unless the
/// cache file says it was already fetched.
pub async fn run<C: ApiClient>(config: &Config, client: &C) -> Result<Outcome> {
    let artifact = resolve_artifact(config, client).await?;

    tracing::debug!(
        "Artifact found: {} ({} bytes), created on: {}",
        artifact.name,
        artifact.size_in_bytes,
        artifact
            .created_at
            .map_or_else(|| "unknown".to_string(), |t| t.to_rfc3339())
    );

    let cache_file = config.cache_file.as_deref();
    if cache::should_skip(&artifact, cache_file)? {
        tracing::debug!("Artifact {} already downloaded, nothing to do", artifact.id);
        return Ok(Outcome::AlreadyDownloaded { artifact });
    }

    if artifact.expired {
        tracing::warn!("Artifact {} is marked as expired, the download will likely fail", artifact);
    }

    let path = config.destination_for(&artifact.name);
    tracing::debug!("Downloading {}", artifact.archive_download_url);
    let bytes = client
        .download(&artifact.archive_download_url, &path, artifact.size_in_bytes)
        .await?;

    if let Err(e) = cache::record(&artifact, cache_file) {
        tracing::warn!("Failed to record artifact {} in the cache file: {}", artifact.id, e);
    }

    tracing::debug!("File downloaded to {}", path.display());
    Ok(Outcome::Downloaded {
        artifact,
        path,
        bytes,
    })
}

async fn resolve_artifact<C: ApiClient>(config: &Config, client: &C) -> Result<Artifact> {
    let scope = match config.workflow.as_deref() {
        Some(workflow) => {
            let run = find_latest_successful_run(
                client,
                &config.repository,
                Some(workflow),
                config.branch.as_deref(),
            )
            .await?
            .ok_or_else(|| Error::NotFound("No successful workflow run found".to_string()))?;

            tracing::debug!(
                "Successful run found: {} on {}, {} started on: {}",
                run.event,
                run.head_branch.as_deref().unwrap_or("-"),
                run.name.as_deref().unwrap_or("-"),
                run.created_at.to_rfc3339()
            );

            ArtifactScope::Run(run.id)
        }
        None => {
            if config.branch.is_some() {
                tracing::warn!("--branch is only used together with --workflow, ignoring it");
            }
            ArtifactScope::Repository
        }
    };

    find_artifact(client, &config.repository, scope, config.artifact.as_deref())
        .await?
        .ok_or_else(|| Error::NotFound("Artifact not found!".to_string()))
}
