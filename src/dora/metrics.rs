use chrono::{DateTime, Utc};

use crate::models::{DeploymentLineage, ProjectLineage};
use crate::timestamps::seconds_between;

/// The four raw DORA values. `None` means there was nothing to measure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoraMetrics {
    pub lead_time: Option<f64>,
    pub deployment_frequency: Option<f64>,
    pub change_failure_rate: Option<f64>,
    pub time_to_restore_service: Option<f64>,
}

impl DoraMetrics {
    pub fn compute(projects: &[ProjectLineage], now: DateTime<Utc>) -> Self {
        Self {
            lead_time: change_lead_time(projects),
            deployment_frequency: deployment_frequency(projects, now),
            change_failure_rate: change_failure_rate(projects),
            time_to_restore_service: time_to_restore_service(projects),
        }
    }
}

fn all_deployments(projects: &[ProjectLineage]) -> impl Iterator<Item = &DeploymentLineage> {
    projects.iter().flat_map(|project| project.deployments.iter())
}

#[allow(clippy::cast_precision_loss)]
fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[allow(clippy::cast_precision_loss)]
fn per_deployment(total: f64, deployments: usize) -> Option<f64> {
    if deployments == 0 {
        return None;
    }
    Some(total / deployments as f64)
}

/// Mean seconds from the earliest commit of each deployment to the deployment.
pub fn change_lead_time(projects: &[ProjectLineage]) -> Option<f64> {
    let samples: Vec<f64> = all_deployments(projects)
        .filter_map(|lineage| {
            lineage
                .earliest_commit()
                .map(|earliest| seconds_between(earliest, lineage.deployment.created))
        })
        .collect();

    mean(&samples)
}

/// Mean seconds per deployment from the first deployment seen until `now`.
///
/// Measured against `now` rather than the last deployment so that a quiet
/// period after the last release still counts against the score.
pub fn deployment_frequency(projects: &[ProjectLineage], now: DateTime<Utc>) -> Option<f64> {
    let earliest = all_deployments(projects)
        .map(|lineage| lineage.deployment.created)
        .min()?;
    let count = all_deployments(projects).count();

    per_deployment(seconds_between(earliest, now), count)
}

/// Build information entries carrying work items, per deployment.
///
/// Fix deployments stand in for failed ones, so a single fix for several bad
/// deployments is counted once.
#[allow(clippy::cast_precision_loss)]
pub fn change_failure_rate(projects: &[ProjectLineage]) -> Option<f64> {
    let flagged = all_deployments(projects)
        .flat_map(|lineage| lineage.builds.iter())
        .filter(|build| !build.work_items.is_empty())
        .count();
    let count = all_deployments(projects).count();

    per_deployment(flagged as f64, count)
}

/// Mean seconds from a work item being opened to the deployment shipping it,
/// one sample per work item.
pub fn time_to_restore_service(projects: &[ProjectLineage]) -> Option<f64> {
    let samples: Vec<f64> = all_deployments(projects)
        .flat_map(|lineage| {
            lineage
                .work_items()
                .map(|item| seconds_between(item.created_at, lineage.deployment.created))
        })
        .collect();

    mean(&samples)
}
