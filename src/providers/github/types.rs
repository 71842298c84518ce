use serde::Deserialize;

use crate::error::Result;
use crate::models::{CommitDetail, WorkItemDetail};
use crate::timestamps::parse_github_timestamp;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubCommitDto {
    pub commit: GitHubGitCommitDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubGitCommitDto {
    pub committer: GitHubSignatureDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubSignatureDto {
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubIssueDto {
    pub created_at: String,
    pub closed_at: Option<String>,
}

impl GitHubCommitDto {
    pub fn into_detail(self) -> Result<CommitDetail> {
        Ok(CommitDetail {
            committed_at: parse_github_timestamp(&self.commit.committer.date)?,
        })
    }
}

impl GitHubIssueDto {
    pub fn into_detail(self) -> Result<WorkItemDetail> {
        Ok(WorkItemDetail {
            created_at: parse_github_timestamp(&self.created_at)?,
            closed_at: self
                .closed_at
                .as_deref()
                .map(parse_github_timestamp)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_dto_uses_committer_date() {
        let dto: GitHubCommitDto = serde_json::from_str(
            r#"{"sha":"abc","commit":{"author":{"date":"2022-01-01T00:00:00Z"},"committer":{"date":"2022-01-02T00:00:00Z"}}}"#,
        )
        .unwrap();

        let detail = dto.into_detail().unwrap();

        assert_eq!(detail.committed_at.to_rfc3339(), "2022-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_commit_dto_missing_committer_is_an_error() {
        let result: std::result::Result<GitHubCommitDto, _> =
            serde_json::from_str(r#"{"commit":{"author":{"date":"2022-01-01T00:00:00Z"}}}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_open_issue_has_no_closed_at() {
        let dto: GitHubIssueDto = serde_json::from_str(
            r#"{"number":1,"created_at":"2022-01-01T00:00:00Z","closed_at":null}"#,
        )
        .unwrap();

        let detail = dto.into_detail().unwrap();

        assert!(detail.closed_at.is_none());
    }

    #[test]
    fn test_closed_issue_parses_both_dates() {
        let dto: GitHubIssueDto = serde_json::from_str(
            r#"{"created_at":"2022-01-01T00:00:00Z","closed_at":"2022-01-03T12:00:00Z"}"#,
        )
        .unwrap();

        let detail = dto.into_detail().unwrap();

        assert_eq!(
            (detail.closed_at.unwrap() - detail.created_at).num_hours(),
            60
        );
    }

    #[test]
    fn test_issue_with_bad_date_is_an_error() {
        let dto: GitHubIssueDto =
            serde_json::from_str(r#"{"created_at":"2022-01-01 00:00:00","closed_at":null}"#)
                .unwrap();

        assert!(dto.into_detail().is_err());
    }
}
