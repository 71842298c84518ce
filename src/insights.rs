use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::Scope;
use crate::dora::{classify, Classification, DoraMetrics, MetricKind};
use crate::models::ProjectLineage;

#[derive(Debug, Serialize, Deserialize)]
pub struct DoraInsights {
    pub space: String,
    pub environment: String,
    pub projects: Vec<String>,
    pub collected_at: DateTime<Utc>,
    pub total_deployments: usize,
    pub deployments_per_project: IndexMap<String, usize>,
    pub lead_time: Classification,
    pub deployment_frequency: Classification,
    pub change_failure_rate: Classification,
    pub time_to_restore_service: Classification,
}

impl DoraInsights {
    pub fn new(
        scope: &Scope,
        lineage: &[ProjectLineage],
        metrics: DoraMetrics,
        collected_at: DateTime<Utc>,
    ) -> Self {
        let deployments_per_project: IndexMap<String, usize> = lineage
            .iter()
            .map(|project| (project.name.clone(), project.deployments.len()))
            .collect();

        Self {
            space: scope.space.clone(),
            environment: scope.environment.clone(),
            projects: scope.projects.clone(),
            collected_at,
            total_deployments: lineage.iter().map(|p| p.deployments.len()).sum(),
            deployments_per_project,
            lead_time: classify(MetricKind::LeadTime, metrics.lead_time),
            deployment_frequency: classify(
                MetricKind::DeploymentFrequency,
                metrics.deployment_frequency,
            ),
            change_failure_rate: classify(
                MetricKind::ChangeFailureRate,
                metrics.change_failure_rate,
            ),
            time_to_restore_service: classify(
                MetricKind::TimeToRestoreService,
                metrics.time_to_restore_service,
            ),
        }
    }

    pub fn to_text(&self) -> String {
        [
            format!(
                "DORA stats for project(s) {} in {}",
                self.projects.join(","),
                self.environment
            ),
            self.lead_time.summary.clone(),
            self.deployment_frequency.summary.clone(),
            self.change_failure_rate.summary.clone(),
            self.time_to_restore_service.summary.clone(),
        ]
        .join("\n")
    }
}
