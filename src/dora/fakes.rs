//! In-memory collaborators for exercising the pipeline without HTTP.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::{DoraLensError, Result};
use crate::models::{
    BuildInformation, CommitDetail, CommitReference, Deployment, NamedResource, Release,
    ResourceKind, WorkItemDetail, WorkItemReference,
};
use crate::providers::{DeploymentSource, SourceHost};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn deployment(id: &str, project_id: &str, created: DateTime<Utc>) -> Deployment {
    Deployment {
        id: id.to_string(),
        created,
        release_id: format!("Releases-{id}"),
        project_id: project_id.to_string(),
    }
}

pub fn build(commit_links: &[&str], work_item_links: &[&str]) -> BuildInformation {
    BuildInformation {
        commits: commit_links
            .iter()
            .map(|link| CommitReference {
                link_url: (*link).to_string(),
            })
            .collect(),
        work_items: work_item_links
            .iter()
            .map(|link| WorkItemReference {
                link_url: (*link).to_string(),
            })
            .collect(),
    }
}

#[derive(Default)]
pub struct FakeDeploymentSource {
    spaces: Vec<NamedResource>,
    environments: Vec<NamedResource>,
    projects: Vec<NamedResource>,
    deployments: HashMap<String, Vec<Deployment>>,
    releases: HashMap<String, Release>,
    requests: Mutex<Vec<String>>,
}

fn named(id: &str, name: &str) -> NamedResource {
    NamedResource {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn prefix_search(items: &[NamedResource], partial_name: &str) -> Vec<NamedResource> {
    items
        .iter()
        .filter(|item| item.name.starts_with(partial_name))
        .cloned()
        .collect()
}

impl FakeDeploymentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_space(mut self, id: &str, name: &str) -> Self {
        self.spaces.push(named(id, name));
        self
    }

    pub fn with_environment(mut self, id: &str, name: &str) -> Self {
        self.environments.push(named(id, name));
        self
    }

    pub fn with_project(mut self, id: &str, name: &str) -> Self {
        self.projects.push(named(id, name));
        self
    }

    /// Registers a deployment into `environment_id` and its release.
    pub fn with_deployment(
        mut self,
        environment_id: &str,
        deployment: Deployment,
        builds: Vec<BuildInformation>,
    ) -> Self {
        self.releases.insert(
            deployment.release_id.clone(),
            Release {
                build_information: builds,
            },
        );
        self.deployments
            .entry(environment_id.to_string())
            .or_default()
            .push(deployment);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl DeploymentSource for FakeDeploymentSource {
    async fn search_spaces(&self, partial_name: &str) -> Result<Vec<NamedResource>> {
        self.record(format!("spaces?partialName={partial_name}"));
        Ok(prefix_search(&self.spaces, partial_name))
    }

    async fn search_resources(
        &self,
        space_id: &str,
        kind: ResourceKind,
        partial_name: &str,
    ) -> Result<Vec<NamedResource>> {
        self.record(format!(
            "{space_id}/{}?partialName={partial_name}",
            kind.as_path()
        ));
        let items = match kind {
            ResourceKind::Environments => &self.environments,
            ResourceKind::Projects => &self.projects,
        };
        Ok(prefix_search(items, partial_name))
    }

    async fn list_deployments(
        &self,
        space_id: &str,
        environment_id: &str,
    ) -> Result<Vec<Deployment>> {
        self.record(format!("{space_id}/deployments?environments={environment_id}"));
        Ok(self
            .deployments
            .get(environment_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_release(&self, space_id: &str, release_id: &str) -> Result<Release> {
        self.record(format!("{space_id}/releases/{release_id}"));
        self.releases
            .get(release_id)
            .cloned()
            .ok_or_else(|| DoraLensError::Api(format!("404 Not Found - {release_id}")))
    }
}

#[derive(Default)]
pub struct FakeSourceHost {
    commits: HashMap<String, CommitDetail>,
    work_items: HashMap<String, WorkItemDetail>,
    failing_links: Vec<String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeSourceHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commit(mut self, link: &str, committed_at: DateTime<Utc>) -> Self {
        self.commits
            .insert(link.to_string(), CommitDetail { committed_at });
        self
    }

    pub fn with_work_item(
        mut self,
        link: &str,
        created_at: DateTime<Utc>,
        closed_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.work_items.insert(
            link.to_string(),
            WorkItemDetail {
                created_at,
                closed_at,
            },
        );
        self
    }

    /// Lookups of `link` fail as if the host were unreachable.
    pub fn with_failing_link(mut self, link: &str) -> Self {
        self.failing_links.push(link.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn record(&self, link: &str) -> Result<()> {
        self.lookups.lock().unwrap().push(link.to_string());
        if self.failing_links.iter().any(|failing| failing == link) {
            return Err(DoraLensError::Api(format!("503 Service Unavailable - {link}")));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceHost for FakeSourceHost {
    async fn fetch_commit(&self, link_url: &str) -> Result<Option<CommitDetail>> {
        self.record(link_url)?;
        Ok(self.commits.get(link_url).copied())
    }

    async fn fetch_work_item(&self, link_url: &str) -> Result<Option<WorkItemDetail>> {
        self.record(link_url)?;
        Ok(self.work_items.get(link_url).copied())
    }
}
