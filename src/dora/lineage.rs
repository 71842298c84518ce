use log::debug;

use crate::error::Result;
use crate::models::{Deployment, DeploymentLineage, ResolvedBuild};
use crate::providers::{DeploymentSource, SourceHost};

/// Loads the release behind `deployment` and resolves every commit and work
/// item it references, one request at a time.
///
/// Nothing is cached: a release deployed twice is fetched twice, and a commit
/// shared by two releases is looked up for each of them.
pub async fn join_lineage<D, S>(
    source: &D,
    host: &S,
    space_id: &str,
    deployment: Deployment,
) -> Result<DeploymentLineage>
where
    D: DeploymentSource + ?Sized,
    S: SourceHost + ?Sized,
{
    let release = source
        .fetch_release(space_id, &deployment.release_id)
        .await?;

    let mut builds = Vec::with_capacity(release.build_information.len());
    for build_information in &release.build_information {
        let mut build = ResolvedBuild::default();

        for commit in &build_information.commits {
            if let Some(detail) = host.fetch_commit(&commit.link_url).await? {
                build.commits.push(detail);
            }
        }

        for work_item in &build_information.work_items {
            if let Some(detail) = host.fetch_work_item(&work_item.link_url).await? {
                build.work_items.push(detail);
            }
        }

        builds.push(build);
    }

    debug!(
        "Joined {} to {} build information entries",
        deployment.id,
        builds.len()
    );

    Ok(DeploymentLineage { deployment, builds })
}
