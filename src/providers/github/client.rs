use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{GitHubCommitDto, GitHubIssueDto};
use super::url_utils::{commit_api_url, work_item_api_url};
use crate::auth::BasicCredentials;
use crate::error::{DoraLensError, Result};
use crate::models::{CommitDetail, WorkItemDetail};
use crate::providers::SourceHost;

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    credentials: BasicCredentials,
}

impl GitHubClient {
    pub fn new(api_url: &Url, credentials: BasicCredentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("DoraLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DoraLensError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(&format!("{}/", api_url.as_str().trim_end_matches('/')))
            .map_err(|e| DoraLensError::Config(format!("Invalid GitHub API URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            credentials,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.token.as_str()),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DoraLensError::Api(format!(
                "GitHub request failed: {status} - {body}"
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn fetch_commit(&self, link_url: &str) -> Result<Option<CommitDetail>> {
        let Some(url) = commit_api_url(&self.api_url, link_url) else {
            warn!("Skipping commit link that does not point at GitHub: {link_url}");
            return Ok(None);
        };

        let commit: GitHubCommitDto = self.get_json(url).await?;
        commit.into_detail().map(Some)
    }

    async fn fetch_work_item(&self, link_url: &str) -> Result<Option<WorkItemDetail>> {
        let Some(url) = work_item_api_url(&self.api_url, link_url) else {
            warn!("Skipping work item link that does not point at GitHub: {link_url}");
            return Ok(None);
        };

        let issue: GitHubIssueDto = self.get_json(url).await?;
        issue.into_detail().map(Some)
    }
}
