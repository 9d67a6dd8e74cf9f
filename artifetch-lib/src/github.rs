use crate::api_client::{ApiClient, RawPage};
use crate::config::Repository;
use crate::download::copy_stream;
use crate::error::{Error, Result};
use crate::logging::progress_bar_style;
use crate::pagination::Listing;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Number of records requested per page from list endpoints.
pub const PAGE_SIZE: u32 = 50;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
    #[serde(other)]
    Other,
}

/// Matches the GitHub API JSON for a single workflow run
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct WorkflowRun {
    pub id: u64,
    pub name: Option<String>,
    /// `None` while the run has not completed
    pub conclusion: Option<Conclusion>,
    pub head_branch: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub event: String,
}

impl WorkflowRun {
    /// A successful run, optionally restricted to a workflow name and branch.
    pub fn is_successful_match(&self, workflow_name: Option<&str>, branch: Option<&str>) -> bool {
        self.conclusion == Some(Conclusion::Success)
            && workflow_name.is_none_or(|name| self.name.as_deref() == Some(name))
            && branch.is_none_or(|branch| self.head_branch.as_deref() == Some(branch))
    }
}

/// Matches the GitHub API JSON for a single artifact
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Artifact {
    pub id: u64,
    pub name: String,
    pub size_in_bytes: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub archive_download_url: String,
    #[serde(default)]
    pub expired: bool,
}

impl Artifact {
    pub fn matches_name(&self, name: Option<&str>) -> bool {
        name.is_none_or(|name| self.name == name)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{}, {} bytes)", self.name, self.id, self.size_in_bytes)
    }
}

/// `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunList {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

impl Listing for WorkflowRunList {
    type Item = WorkflowRun;

    fn into_items(self) -> Vec<WorkflowRun> {
        self.workflow_runs
    }
}

/// `GET /repos/{owner}/{repo}/actions/artifacts` and `.../runs/{run_id}/artifacts`
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactList {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Listing for ArtifactList {
    type Item = Artifact;

    fn into_items(self) -> Vec<Artifact> {
        self.artifacts
    }
}

pub fn workflow_runs_url(api_url: &str, repo: &Repository) -> String {
    format!("{api_url}/repos/{repo}/actions/runs?per_page={PAGE_SIZE}")
}

pub fn repository_artifacts_url(api_url: &str, repo: &Repository) -> String {
    format!("{api_url}/repos/{repo}/actions/artifacts?per_page={PAGE_SIZE}")
}

pub fn run_artifacts_url(api_url: &str, repo: &Repository, run_id: u64) -> String {
    format!("{api_url}/repos/{repo}/actions/runs/{run_id}/artifacts?per_page={PAGE_SIZE}")
}

/// Extracts the `rel="next"` target from a `link` header such as
/// `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`.
pub fn parse_next_link(link_header: &str) -> Option<String> {
    for part in link_header.split(',') {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        if segments.any(|param| param.trim() == "rel=\"next\"") {
            return Some(target.trim_matches(|c| c == '<' || c == '>').to_string());
        }
    }
    None
}

pub struct GitHubClient {
    api_url: String,
    client: Client,
}

impl ApiClient for GitHubClient {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_page(&self, url: &str) -> Result<RawPage> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "request to {url} failed: {}",
                response.status()
            )));
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|h| h.to_str().ok())
            .and_then(parse_next_link);
        let body = response.text().await?;

        Ok(RawPage { body, next })
    }

    #[instrument(level = "debug", skip_all)]
    async fn download(&self, url: &str, destination: &Path, expected_size: u64) -> Result<u64> {
        let current_span = tracing::Span::current();
        if let Ok(style) = progress_bar_style() {
            current_span.pb_set_style(&style);
        }
        current_span.pb_set_length(expected_size);
        current_span.pb_set_message(&format!("Downloading {}...", destination.display()));
        current_span.pb_set_finish_message(&format!(
            "Downloading {}... Complete!",
            destination.display()
        ));

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "download failed: {}",
                response.status()
            )));
        }

        copy_stream(response.bytes_stream(), destination, |written| {
            current_span.pb_set_position(written)
        })
        .await
    }
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            Error::Configuration("GitHub token contains invalid characters".to_string())
        })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .user_agent(concat!("artifetch/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            client,
        })
    }

    /// Points the client at another API host, e.g. GitHub Enterprise or a test server.
    pub fn with_api_url(self, api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..self
        }
    }
}
