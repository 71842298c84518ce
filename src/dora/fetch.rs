use std::cmp::Reverse;

use log::{info, warn};

use crate::error::Result;
use crate::models::Deployment;
use crate::providers::DeploymentSource;

/// Keeps the deployments of `project_id`, newest first.
///
/// The sort is stable, so deployments created at the same instant keep the
/// order the server listed them in.
pub fn select_project_deployments(
    deployments: Vec<Deployment>,
    project_id: &str,
) -> Vec<Deployment> {
    let mut selected: Vec<Deployment> = deployments
        .into_iter()
        .filter(|deployment| deployment.project_id == project_id)
        .collect();
    selected.sort_by_key(|deployment| Reverse(deployment.created));
    selected
}

/// Deployments of one project into one environment. Any unresolved id yields
/// an empty list.
pub async fn fetch_deployments<D>(
    source: &D,
    space_id: Option<&str>,
    environment_id: Option<&str>,
    project_id: Option<&str>,
) -> Result<Vec<Deployment>>
where
    D: DeploymentSource + ?Sized,
{
    let (Some(space_id), Some(environment_id), Some(project_id)) =
        (space_id, environment_id, project_id)
    else {
        return Ok(Vec::new());
    };

    let listed = source.list_deployments(space_id, environment_id).await?;
    let deployments = select_project_deployments(listed, project_id);

    if deployments.is_empty() {
        warn!("The project id {project_id} did not have a deployment in {space_id}");
    } else {
        info!(
            "Found {} deployments of {project_id} to {environment_id}",
            deployments.len()
        );
    }

    Ok(deployments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dora::fakes::{days_ago, deployment, FakeDeploymentSource};

    fn ids(deployments: &[Deployment]) -> Vec<&str> {
        deployments.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let listed = vec![
            deployment("a", "Projects-1", days_ago(5)),
            deployment("b", "Projects-1", days_ago(1)),
            deployment("c", "Projects-1", days_ago(10)),
        ];

        let selected = select_project_deployments(listed, "Projects-1");

        assert_eq!(ids(&selected), vec!["b", "a", "c"]);
        assert!(selected
            .windows(2)
            .all(|pair| pair[0].created >= pair[1].created));
    }

    #[test]
    fn test_equal_timestamps_keep_listing_order() {
        let listed = vec![
            deployment("first", "Projects-1", days_ago(2)),
            deployment("newest", "Projects-1", days_ago(1)),
            deployment("second", "Projects-1", days_ago(2)),
            deployment("third", "Projects-1", days_ago(2)),
        ];

        let selected = select_project_deployments(listed, "Projects-1");

        assert_eq!(ids(&selected), vec!["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_other_projects_are_filtered_out() {
        let listed = vec![
            deployment("a", "Projects-1", days_ago(3)),
            deployment("b", "Projects-2", days_ago(2)),
        ];

        let selected = select_project_deployments(listed, "Projects-2");

        assert_eq!(ids(&selected), vec!["b"]);
    }

    #[test]
    fn test_no_matching_project_is_empty() {
        let listed = vec![deployment("a", "Projects-1", days_ago(3))];

        assert!(select_project_deployments(listed, "Projects-9").is_empty());
    }

    #[tokio::test]
    async fn test_missing_identifier_skips_listing() {
        let source = FakeDeploymentSource::new();

        let deployments = fetch_deployments(&source, Some("Spaces-1"), None, Some("Projects-1"))
            .await
            .unwrap();

        assert!(deployments.is_empty());
        assert_eq!(source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_filters_listing_for_environment() {
        let source = FakeDeploymentSource::new()
            .with_deployment(
                "Environments-1",
                deployment("old", "Projects-1", days_ago(9)),
                vec![],
            )
            .with_deployment(
                "Environments-1",
                deployment("new", "Projects-1", days_ago(1)),
                vec![],
            )
            .with_deployment(
                "Environments-2",
                deployment("staging", "Projects-1", days_ago(2)),
                vec![],
            );

        let deployments = fetch_deployments(
            &source,
            Some("Spaces-1"),
            Some("Environments-1"),
            Some("Projects-1"),
        )
        .await
        .unwrap();

        assert_eq!(ids(&deployments), vec!["new", "old"]);
    }
}
