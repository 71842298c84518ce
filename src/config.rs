use std::path::PathBuf;

use clap::ValueEnum;
use indexmap::IndexSet;
use url::Url;

use crate::auth::{BasicCredentials, Token};
use crate::error::{DoraLensError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What to measure: one environment of one space, across the selected projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub space: String,
    pub environment: String,
    pub projects: Vec<String>,
}

/// Validated run configuration, built once from the command line.
#[derive(Debug)]
pub struct Config {
    pub octopus_url: Url,
    pub octopus_api_key: Token,
    pub github_api_url: Url,
    pub github_credentials: BasicCredentials,
    pub scope: Scope,
    pub format: OutputFormat,
    pub pretty: bool,
    pub out_file: Option<PathBuf>,
}

pub fn parse_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| DoraLensError::Config(format!("Invalid {name} '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DoraLensError::Config(format!(
            "Invalid {name} '{raw}': unsupported scheme '{scheme}'"
        ))),
    }
}

pub fn parse_secret(name: &str, raw: &str) -> Result<Token> {
    let token = Token::from(raw);
    if token.is_empty() {
        return Err(DoraLensError::Config(format!("{name} must not be empty")));
    }
    Ok(token)
}

/// Trims each project name, drops blanks left by stray commas and keeps
/// the first occurrence of a repeated name.
pub fn parse_projects(raw: &[String]) -> Result<Vec<String>> {
    let projects: IndexSet<String> = raw
        .iter()
        .map(|project| project.trim())
        .filter(|project| !project.is_empty())
        .map(str::to_string)
        .collect();

    if projects.is_empty() {
        return Err(DoraLensError::Config(
            "At least one project name is required".to_string(),
        ));
    }

    Ok(projects.into_iter().collect())
}

pub fn parse_name(name: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DoraLensError::Config(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
}
