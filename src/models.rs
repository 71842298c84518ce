use chrono::{DateTime, Utc};

/// A space, environment or project as returned by a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedResource {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Environments,
    Projects,
}

impl ResourceKind {
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Environments => "environments",
            Self::Projects => "projects",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environments => write!(f, "environment"),
            Self::Projects => write!(f, "project"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub id: String,
    pub created: DateTime<Utc>,
    pub release_id: String,
    pub project_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct Release {
    pub build_information: Vec<BuildInformation>,
}

#[derive(Debug, Clone, Default)]
pub struct BuildInformation {
    pub commits: Vec<CommitReference>,
    pub work_items: Vec<WorkItemReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReference {
    pub link_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemReference {
    pub link_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitDetail {
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkItemDetail {
    pub created_at: DateTime<Utc>,
    // Restore time is measured from created_at; kept for a closed-date variant.
    #[allow(dead_code)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// One build-information entry with its references resolved.
#[derive(Debug, Clone, Default)]
pub struct ResolvedBuild {
    pub commits: Vec<CommitDetail>,
    pub work_items: Vec<WorkItemDetail>,
}

#[derive(Debug, Clone)]
pub struct DeploymentLineage {
    pub deployment: Deployment,
    pub builds: Vec<ResolvedBuild>,
}

impl DeploymentLineage {
    pub fn earliest_commit(&self) -> Option<DateTime<Utc>> {
        self.builds
            .iter()
            .flat_map(|build| build.commits.iter())
            .map(|commit| commit.committed_at)
            .min()
    }

    pub fn work_items(&self) -> impl Iterator<Item = &WorkItemDetail> {
        self.builds.iter().flat_map(|build| build.work_items.iter())
    }
}

/// Every joined deployment of one selected project, newest first.
#[derive(Debug, Clone)]
pub struct ProjectLineage {
    pub name: String,
    pub deployments: Vec<DeploymentLineage>,
}
