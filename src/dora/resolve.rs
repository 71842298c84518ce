use log::{info, warn};

use crate::error::Result;
use crate::models::{NamedResource, ResourceKind};
use crate::providers::DeploymentSource;

/// Picks the candidate whose name equals `name` exactly once both are trimmed.
///
/// The search endpoints match on prefix, so "Acme" also returns "Acme Web".
pub fn select_exact(candidates: Vec<NamedResource>, name: &str) -> Option<String> {
    let wanted = name.trim();
    candidates
        .into_iter()
        .find(|candidate| candidate.name == wanted)
        .map(|candidate| candidate.id)
}

pub async fn resolve_space<D>(source: &D, name: &str) -> Result<Option<String>>
where
    D: DeploymentSource + ?Sized,
{
    let candidates = source.search_spaces(name.trim()).await?;
    let id = select_exact(candidates, name);

    match &id {
        Some(id) => info!("Resolved space '{}' to {id}", name.trim()),
        None => warn!("The space called {} could not be found", name.trim()),
    }

    Ok(id)
}

/// Resolves an environment or project within a space; an unknown space
/// resolves to nothing without calling the server.
pub async fn resolve_resource<D>(
    source: &D,
    space_id: Option<&str>,
    kind: ResourceKind,
    name: &str,
) -> Result<Option<String>>
where
    D: DeploymentSource + ?Sized,
{
    let Some(space_id) = space_id else {
        return Ok(None);
    };

    let candidates = source.search_resources(space_id, kind, name.trim()).await?;
    let id = select_exact(candidates, name);

    match &id {
        Some(id) => info!("Resolved {kind} '{}' to {id}", name.trim()),
        None => warn!(
            "The {kind} called {} could not be found in space {space_id}",
            name.trim()
        ),
    }

    Ok(id)
}
