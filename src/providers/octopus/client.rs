use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    OctopusDeploymentDto, OctopusNamedResourceDto, OctopusPageDto, OctopusReleaseDto,
};
use crate::auth::Token;
use crate::error::{DoraLensError, Result};
use crate::models::{Deployment, NamedResource, Release, ResourceKind};
use crate::providers::DeploymentSource;

/// Every collection request asks for a single page of this many items.
pub const PAGE_SIZE: u32 = 1000;

const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

pub struct OctopusClient {
    client: Client,
    api_url: Url,
    api_key: Token,
}

impl OctopusClient {
    pub fn new(base_url: &Url, api_key: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("DoraLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DoraLensError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Keep any path prefix of the server URL when joining.
        let root = format!("{}/", base_url.as_str().trim_end_matches('/'));
        let api_url = Url::parse(&root)
            .and_then(|url| url.join("api/"))
            .map_err(|e| DoraLensError::Config(format!("Invalid Octopus URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| DoraLensError::Config(format!("Invalid Octopus endpoint '{path}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DoraLensError::Api(format!(
                "Octopus request failed: {status} - {body}"
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn search(&self, url: Url, partial_name: &str) -> Result<Vec<NamedResource>> {
        let page: OctopusPageDto<OctopusNamedResourceDto> = self
            .get_json(
                url,
                &[
                    ("partialName", partial_name.trim().to_string()),
                    ("take", PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        Ok(page.items.into_iter().map(NamedResource::from).collect())
    }
}

#[async_trait]
impl DeploymentSource for OctopusClient {
    async fn search_spaces(&self, partial_name: &str) -> Result<Vec<NamedResource>> {
        let url = self.endpoint("spaces")?;
        self.search(url, partial_name).await
    }

    async fn search_resources(
        &self,
        space_id: &str,
        kind: ResourceKind,
        partial_name: &str,
    ) -> Result<Vec<NamedResource>> {
        let url = self.endpoint(&format!("{space_id}/{}", kind.as_path()))?;
        self.search(url, partial_name).await
    }

    async fn list_deployments(
        &self,
        space_id: &str,
        environment_id: &str,
    ) -> Result<Vec<Deployment>> {
        let url = self.endpoint(&format!("{space_id}/deployments"))?;
        let page: OctopusPageDto<OctopusDeploymentDto> = self
            .get_json(
                url,
                &[
                    ("environments", environment_id.to_string()),
                    ("take", PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        page.items
            .into_iter()
            .map(OctopusDeploymentDto::into_deployment)
            .collect()
    }

    async fn fetch_release(&self, space_id: &str, release_id: &str) -> Result<Release> {
        let url = self.endpoint(&format!("{space_id}/releases/{release_id}"))?;
        let release: OctopusReleaseDto = self.get_json(url, &[]).await?;
        Ok(release.into())
    }
}
