use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable consulted when no token is passed explicitly.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Repository {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::Configuration(format!(
                "Repository '{s}' must be given as owner/name"
            ))),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Repository whose artifacts are searched
    pub repository: Repository,

    /// GitHub token sent as a bearer credential
    pub token: String,

    /// Only accept artifacts with this exact name
    pub artifact: Option<String>,

    /// Local filename for the download, `<artifact name>.zip` when unset
    pub filename: Option<PathBuf>,

    /// Only accept artifacts of the latest successful run of this workflow
    pub workflow: Option<String>,

    /// Only accept workflow runs on this branch (needs `workflow`)
    pub branch: Option<String>,

    /// File holding the id of the last downloaded artifact
    pub cache_file: Option<PathBuf>,

    /// Emit debugging information and download progress
    pub verbose: bool,

    /// Show the full error report instead of a one-line message
    pub traceback: bool,
}

impl Config {
    /// Picks the explicit token if present, otherwise the value of [TOKEN_ENV_VAR].
    /// Empty values count as missing.
    pub fn resolve_token(explicit: Option<String>) -> Result<String> {
        Self::resolve_token_from(explicit, std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn resolve_token_from(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
        explicit
            .filter(|t| !t.is_empty())
            .or(from_env.filter(|t| !t.is_empty()))
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "Please specify a GitHub personal access token with --token or {TOKEN_ENV_VAR}"
                ))
            })
    }

    /// Local path the artifact is written to.
    pub fn destination_for(&self, artifact_name: &str) -> PathBuf {
        self.filename
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{artifact_name}.zip")))
    }
}
