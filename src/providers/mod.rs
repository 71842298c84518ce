pub mod github;
pub mod octopus;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CommitDetail, Deployment, NamedResource, Release, ResourceKind, WorkItemDetail,
};

/// Read-only view of the release orchestration server.
#[async_trait]
pub trait DeploymentSource: Send + Sync {
    /// Prefix search over spaces, capped at one page.
    async fn search_spaces(&self, partial_name: &str) -> Result<Vec<NamedResource>>;

    /// Prefix search over environments or projects within a space.
    async fn search_resources(
        &self,
        space_id: &str,
        kind: ResourceKind,
        partial_name: &str,
    ) -> Result<Vec<NamedResource>>;

    /// One page of deployments into an environment, across all projects.
    async fn list_deployments(
        &self,
        space_id: &str,
        environment_id: &str,
    ) -> Result<Vec<Deployment>>;

    async fn fetch_release(&self, space_id: &str, release_id: &str) -> Result<Release>;
}

/// Read-only view of the source hosting service.
///
/// `Ok(None)` means the link does not point at anything this host can resolve.
#[async_trait]
pub trait SourceHost: Send + Sync {
    async fn fetch_commit(&self, link_url: &str) -> Result<Option<CommitDetail>>;

    async fn fetch_work_item(&self, link_url: &str) -> Result<Option<WorkItemDetail>>;
}
