use chrono::{DateTime, Utc};
use log::info;

use super::fetch::fetch_deployments;
use super::lineage::join_lineage;
use super::metrics::DoraMetrics;
use super::resolve::{resolve_resource, resolve_space};
use crate::config::Scope;
use crate::error::Result;
use crate::insights::DoraInsights;
use crate::models::{ProjectLineage, ResourceKind};
use crate::providers::{DeploymentSource, SourceHost};

/// Runs the whole pipeline against a pair of collaborators.
///
/// Every lookup is awaited before the next one starts, so requests reach
/// the servers strictly in program order.
pub struct DoraEngine<'a, D: ?Sized, S: ?Sized> {
    source: &'a D,
    host: &'a S,
}

impl<'a, D, S> DoraEngine<'a, D, S>
where
    D: DeploymentSource + ?Sized,
    S: SourceHost + ?Sized,
{
    pub fn new(source: &'a D, host: &'a S) -> Self {
        Self { source, host }
    }

    /// Resolves, fetches and joins every selected project. A project that
    /// cannot be found ends up with no deployments instead of failing the run.
    pub async fn collect_lineage(&self, scope: &Scope) -> Result<Vec<ProjectLineage>> {
        let space_id = resolve_space(self.source, &scope.space).await?;
        let environment_id = resolve_resource(
            self.source,
            space_id.as_deref(),
            ResourceKind::Environments,
            &scope.environment,
        )
        .await?;

        let mut projects = Vec::with_capacity(scope.projects.len());
        for name in &scope.projects {
            let project_id = resolve_resource(
                self.source,
                space_id.as_deref(),
                ResourceKind::Projects,
                name,
            )
            .await?;

            let deployments = fetch_deployments(
                self.source,
                space_id.as_deref(),
                environment_id.as_deref(),
                project_id.as_deref(),
            )
            .await?;

            let mut joined = Vec::with_capacity(deployments.len());
            if let Some(space_id) = space_id.as_deref() {
                for deployment in deployments {
                    joined.push(join_lineage(self.source, self.host, space_id, deployment).await?);
                }
            }

            info!("Joined {} deployments for project {name}", joined.len());
            projects.push(ProjectLineage {
                name: name.clone(),
                deployments: joined,
            });
        }

        Ok(projects)
    }

    pub async fn collect_insights(
        &self,
        scope: &Scope,
        now: DateTime<Utc>,
    ) -> Result<DoraInsights> {
        info!(
            "Collecting DORA metrics for {} in {}",
            scope.projects.join(","),
            scope.environment
        );

        let lineage = self.collect_lineage(scope).await?;
        let metrics = DoraMetrics::compute(&lineage, now);

        Ok(DoraInsights::new(scope, &lineage, metrics, now))
    }
}
