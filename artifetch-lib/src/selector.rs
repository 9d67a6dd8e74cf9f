use crate::api_client::ApiClient;
use crate::config::Repository;
use crate::error::Result;
use crate::github::{
    Artifact, ArtifactList, WorkflowRun, WorkflowRunList, repository_artifacts_url,
    run_artifacts_url, workflow_runs_url,
};
use crate::pagination::{PageFetcher, find_first};

/// Where to look for artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactScope {
    /// Every artifact of the repository, newest first
    Repository,
    /// Only the artifacts uploaded by one workflow run
    Run(u64),
}

/// Returns the newest successful run, optionally of one workflow and branch.
/// GitHub lists runs newest first, so the first match is the latest one.
pub async fn find_latest_successful_run<C: ApiClient>(
    client: &C,
    repo: &Repository,
    workflow_name: Option<&str>,
    branch: Option<&str>,
) -> Result<Option<WorkflowRun>> {
    let pages: PageFetcher<_, WorkflowRunList> =
        PageFetcher::new(client, workflow_runs_url(client.api_url(), repo));

    find_first(pages, "workflow runs", |run| {
        run.is_successful_match(workflow_name, branch)
    })
    .await
}

/// Returns the newest artifact in `scope`, optionally with an exact name.
pub async fn find_artifact<C: ApiClient>(
    client: &C,
    repo: &Repository,
    scope: ArtifactScope,
    name: Option<&str>,
) -> Result<Option<Artifact>> {
    let url = match scope {
        ArtifactScope::Repository => repository_artifacts_url(client.api_url(), repo),
        ArtifactScope::Run(run_id) => run_artifacts_url(client.api_url(), repo, run_id),
    };
    let pages: PageFetcher<_, ArtifactList> = PageFetcher::new(client, url);

    find_first(pages, "artifacts", |artifact| artifact.matches_name(name)).await
}
