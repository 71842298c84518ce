use serde::Deserialize;

use crate::error::Result;
use crate::models::{
    BuildInformation, CommitReference, Deployment, NamedResource, Release, WorkItemReference,
};
use crate::timestamps::parse_octopus_timestamp;

/// Envelope used by every Octopus collection endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OctopusPageDto<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OctopusNamedResourceDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OctopusDeploymentDto {
    pub id: String,
    pub created: String,
    pub release_id: String,
    pub project_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OctopusReleaseDto {
    pub build_information: Vec<OctopusBuildInformationDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OctopusBuildInformationDto {
    pub commits: Vec<OctopusLinkDto>,
    pub work_items: Vec<OctopusLinkDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OctopusLinkDto {
    pub link_url: String,
}

impl From<OctopusNamedResourceDto> for NamedResource {
    fn from(dto: OctopusNamedResourceDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl OctopusDeploymentDto {
    pub fn into_deployment(self) -> Result<Deployment> {
        Ok(Deployment {
            created: parse_octopus_timestamp(&self.created)?,
            id: self.id,
            release_id: self.release_id,
            project_id: self.project_id,
        })
    }
}

impl From<OctopusReleaseDto> for Release {
    fn from(dto: OctopusReleaseDto) -> Self {
        let build_information = dto
            .build_information
            .into_iter()
            .map(|build| BuildInformation {
                commits: build
                    .commits
                    .into_iter()
                    .map(|c| CommitReference {
                        link_url: c.link_url,
                    })
                    .collect(),
                work_items: build
                    .work_items
                    .into_iter()
                    .map(|w| WorkItemReference {
                        link_url: w.link_url,
                    })
                    .collect(),
            })
            .collect();

        Self { build_information }
    }
}
