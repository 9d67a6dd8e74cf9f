use crate::config::Config;
use crate::github::Artifact;
use mock_api_client::MOCK_API_URL;
use serde_json::{Value, json};

pub mod mock_api_client;

pub fn test_config() -> Config {
    Config {
        repository: "acme/widget".parse().expect("valid repository"),
        token: "secret".to_string(),
        artifact: None,
        filename: None,
        workflow: None,
        branch: None,
        cache_file: None,
        verbose: false,
        traceback: false,
    }
}

pub fn download_url(artifact_id: u64) -> String {
    format!("{MOCK_API_URL}/repos/acme/widget/actions/artifacts/{artifact_id}/zip")
}

pub fn artifact_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "size_in_bytes": 1024,
        "archive_download_url": download_url(id),
        "expired": false,
        "created_at": "2024-05-01T12:00:00Z"
    })
}

pub fn artifact(id: u64, name: &str) -> Artifact {
    serde_json::from_value(artifact_json(id, name)).expect("valid artifact json")
}

pub fn run_json(id: u64, name: &str, conclusion: Option<&str>, branch: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "head_branch": branch,
        "event": "push",
        "status": if conclusion.is_some() { "completed" } else { "in_progress" },
        "conclusion": conclusion,
        "created_at": "2024-05-01T12:00:00Z"
    })
}
