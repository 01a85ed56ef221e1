//! GitHub contents API request model
//!
//! Publishing a file is a read (to learn the current blob sha, if any) followed
//! by a create-or-update `PUT` on the same path.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO: &str = "klashxx/soranks";
pub const DEFAULT_BRANCH: &str = "dev";

/// Commit identity attached to the update
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// Subset of the contents API response needed to update a file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentFile {
    pub sha: String,
    #[serde(default)]
    pub path: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Serialize, Clone)]
pub struct UpdateContentRequest {
    pub message: String,
    pub content: String,
    pub branch: String,
    pub committer: Committer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Response of the `PUT` call; only the commit is of interest
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateContentResponse {
    pub commit: CommitInfo,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// URL of a file in the repository, without the `ref` query
pub fn contents_url(api_url: &str, repo: &str, path: &str) -> String {
    format!(
        "{}/repos/{}/contents/{}",
        api_url.trim_end_matches('/'),
        repo.trim_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Commit message stamped with the publish time
pub fn commit_message(path: &str, now: DateTime<Utc>) -> String {
    format!("soranks: update {} ({})", path, now.format("%Y-%m-%d %H:%M UTC"))
}

/// Builds the create-or-update body; `sha` must be the current blob when updating
pub fn build_update_request(
    content: &[u8],
    message: String,
    branch: &str,
    committer: &Committer,
    sha: Option<String>,
) -> UpdateContentRequest {
    UpdateContentRequest {
        message,
        content: base64::engine::general_purpose::STANDARD.encode(content),
        branch: branch.to_string(),
        committer: committer.clone(),
        sha,
    }
}
