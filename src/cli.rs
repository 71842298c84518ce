use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use crate::auth::BasicCredentials;
use crate::config::{self, Config, OutputFormat, Scope};
use crate::dora::DoraEngine;
use crate::providers::github::GitHubClient;
use crate::providers::octopus::OctopusClient;

#[derive(Parser)]
#[command(name = "doralens")]
#[command(author, version, about = "Calculate the DORA metrics", long_about = None)]
pub struct Cli {
    /// The Octopus server URL
    #[arg(long, env = "OCTOPUS_URL", alias = "octopusUrl")]
    octopus_url: String,

    /// The Octopus API key
    #[arg(long, env = "OCTOPUS_API_KEY", alias = "octopusApiKey", hide_env_values = true)]
    octopus_api_key: String,

    /// The GitHub username
    #[arg(long, env = "GITHUB_USER", alias = "githubUser")]
    github_user: String,

    /// The GitHub token or password
    #[arg(long, env = "GITHUB_TOKEN", alias = "githubToken", hide_env_values = true)]
    github_token: String,

    /// The GitHub API URL (change for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,

    /// The Octopus space
    #[arg(long, alias = "octopusSpace")]
    space: String,

    /// Comma separated list of Octopus projects
    #[arg(
        long,
        alias = "octopusProject",
        value_delimiter = ',',
        required = true,
        num_args = 1..
    )]
    project: Vec<String>,

    /// The Octopus environment
    #[arg(long, alias = "octopusEnvironment")]
    environment: String,

    /// The output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Pretty print JSON output
    #[arg(short, long, default_value_t = false)]
    pretty: bool,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    out_file: Option<PathBuf>,
}

impl Cli {
    pub fn to_config(&self) -> crate::error::Result<Config> {
        let github_token = config::parse_secret("GitHub token", &self.github_token)?;
        let github_user = config::parse_name("GitHub user", &self.github_user)?;

        Ok(Config {
            octopus_url: config::parse_url("Octopus URL", &self.octopus_url)?,
            octopus_api_key: config::parse_secret("Octopus API key", &self.octopus_api_key)?,
            github_api_url: config::parse_url("GitHub API URL", &self.github_api_url)?,
            github_credentials: BasicCredentials::new(&github_user, github_token),
            scope: Scope {
                space: config::parse_name("space", &self.space)?,
                environment: config::parse_name("environment", &self.environment)?,
                projects: config::parse_projects(&self.project)?,
            },
            format: self.output,
            pretty: self.pretty,
            out_file: self.out_file.clone(),
        })
    }

    pub async fn execute(&self) -> Result<()> {
        let config = self.to_config()?;

        let octopus = OctopusClient::new(&config.octopus_url, config.octopus_api_key)?;
        let github = GitHubClient::new(&config.github_api_url, config.github_credentials)?;
        let engine = DoraEngine::new(&octopus, &github);

        let insights = engine.collect_insights(&config.scope, Utc::now()).await?;

        let rendered = match config.format {
            OutputFormat::Text => insights.to_text(),
            OutputFormat::Json if config.pretty => serde_json::to_string_pretty(&insights)?,
            OutputFormat::Json => serde_json::to_string(&insights)?,
        };

        if let Some(output_path) = &config.out_file {
            std::fs::write(output_path, rendered)?;
            info!("Insights written to: {}", output_path.display());
        } else {
            println!("{rendered}");
        }

        Ok(())
    }
}
