use crate::ui;
use anyhow::{Context, Result};
use artifetch_lib::config::{Config, Repository};
use artifetch_lib::github::GitHubClient;
use artifetch_lib::pipeline::{self, Outcome};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artifetch")]
#[command(about = "Download the latest GitHub Actions artifact from a GitHub repository")]
#[command(version)]
pub struct Cli {
    /// The GitHub owner/repo path, e.g. bytemeadow/gdenv
    pub repository: String,

    /// The GitHub personal access token. Can also be supplied via the GITHUB_TOKEN env variable
    #[arg(long)]
    pub token: Option<String>,

    /// The name of the artifact to download, e.g. api_docs
    #[arg(long)]
    pub artifact: Option<String>,

    /// Local filename for the downloaded artifact, defaults to <artifact name>.zip
    #[arg(long)]
    pub filename: Option<String>,

    /// Workflow name to download the artifact from
    #[arg(long)]
    pub workflow: Option<String>,

    /// Branch name to download the artifact from, only checked if --workflow is also specified
    #[arg(long)]
    pub branch: Option<String>,

    /// File storing the id of the latest downloaded artifact, to avoid downloading the same
    /// artifact again. Caution: this file is overwritten after every successful download!
    #[arg(long)]
    pub cache_file: Option<String>,

    /// Show the full error report on failure
    #[arg(long)]
    pub traceback: bool,

    /// Output debugging information and download progress
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Empty `--workflow`, `--branch`, `--filename` and `--cache-file` values count as unset.
    pub fn into_config(self) -> Result<Config> {
        let token = Config::resolve_token(self.token)?;
        let repository: Repository = self.repository.parse()?;

        Ok(Config {
            repository,
            token,
            artifact: self.artifact,
            filename: self.filename.filter(|f| !f.is_empty()).map(PathBuf::from),
            workflow: self.workflow.filter(|w| !w.is_empty()),
            branch: self.branch.filter(|b| !b.is_empty()),
            cache_file: self.cache_file.filter(|f| !f.is_empty()).map(PathBuf::from),
            verbose: self.verbose,
            traceback: self.traceback,
        })
    }

    pub async fn run(self) -> Result<()> {
        let config = self.into_config()?;
        let github_client = GitHubClient::new(&config.token)?;

        match pipeline::run(&config, &github_client).await? {
            Outcome::Downloaded { artifact, path, .. } => {
                let path = path
                    .canonicalize()
                    .with_context(|| format!("Failed to resolve {}", path.display()))?;
                ui::success(&format!("Downloaded {artifact}"));
                println!("{}", path.display());
            }
            Outcome::AlreadyDownloaded { artifact } => {
                ui::success(&format!("Artifact {artifact} already downloaded"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_into_config() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "artifetch",
            "acme/widget",
            "--token",
            "secret",
            "--workflow",
            "CI",
            "--branch",
            "main",
            "--cache-file",
            "last-artifact",
            "-v",
        ])?;

        let config = cli.into_config()?;
        assert_eq!(config.repository.to_string(), "acme/widget");
        assert_eq!(config.token, "secret");
        assert_eq!(config.workflow.as_deref(), Some("CI"));
        assert_eq!(config.branch.as_deref(), Some("main"));
        assert_eq!(config.cache_file, Some(PathBuf::from("last-artifact")));
        assert_eq!(config.artifact, None);
        assert!(config.verbose);
        assert!(!config.traceback);
        Ok(())
    }

    #[test]
    fn test_invalid_repository_is_rejected() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["artifetch", "widget", "--token", "secret"])?;
        assert!(cli.into_config().is_err());
        Ok(())
    }

    fn config_from(args: &[&str]) -> anyhow::Result<artifetch_lib::config::Config> {
        let mut argv = vec!["artifetch", "acme/widget", "--token", "secret"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)?.into_config()
    }

    #[test]
    fn test_empty_workflow_searches_the_repository() -> anyhow::Result<()> {
        let config = config_from(&["--workflow", ""])?;
        assert_eq!(config.workflow, None);
        Ok(())
    }

    #[test]
    fn test_empty_branch_is_unset() -> anyhow::Result<()> {
        let config = config_from(&["--workflow", "CI", "--branch", ""])?;
        assert_eq!(config.workflow.as_deref(), Some("CI"));
        assert_eq!(config.branch, None);
        Ok(())
    }

    #[test]
    fn test_empty_filename_falls_back_to_artifact_name() -> anyhow::Result<()> {
        let config = config_from(&["--filename", ""])?;
        assert_eq!(config.filename, None);
        assert_eq!(config.destination_for("docs"), PathBuf::from("docs.zip"));
        Ok(())
    }

    #[test]
    fn test_empty_cache_file_is_unset() -> anyhow::Result<()> {
        let config = config_from(&["--cache-file", ""])?;
        assert_eq!(config.cache_file, None);
        Ok(())
    }

    #[test]
    fn test_empty_artifact_name_is_kept() -> anyhow::Result<()> {
        let config = config_from(&["--artifact", ""])?;
        assert_eq!(config.artifact.as_deref(), Some(""));
        Ok(())
    }
}
