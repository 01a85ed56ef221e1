use crate::prelude::*;
use chrono::Utc;
use log::{info, trace};
use soranks_core::github::{
    build_update_request, commit_message, contents_url, Committer, ContentFile,
    UpdateContentResponse, DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_REPO,
};
use soranks_core::stackexchange::parse_api_key;
use std::fs;
use std::path::{Path, PathBuf};

/// Where and as whom the Markdown ranking is published
#[derive(Debug, Clone, clap::Args)]
#[command(next_help_heading = "Publishing")]
pub struct PublishOptions {
    /// File holding the GitHub token
    #[arg(long, env = "SORANKS_TOKEN_FILE", default_value = "./_secret/token")]
    pub token_file: PathBuf,

    /// GitHub API base URL
    #[arg(long, env = "SORANKS_GITHUB_API", default_value = DEFAULT_API_URL)]
    pub github_api: String,

    /// Repository to publish to, as owner/name
    #[arg(long, env = "SORANKS_GITHUB_REPO", default_value = DEFAULT_REPO)]
    pub github_repo: String,

    /// Branch receiving the commit
    #[arg(long, env = "SORANKS_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Committer name
    #[arg(long, env = "SORANKS_AUTHOR_NAME", default_value = "soranks")]
    pub author_name: String,

    /// Committer email
    #[arg(
        long,
        env = "SORANKS_AUTHOR_EMAIL",
        default_value = "soranks@users.noreply.github.com"
    )]
    pub author_email: String,
}

/// Reads the GitHub token, dropping the trailing newline
fn read_token(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| f!("Failed to read GitHub token from {}", path.display()))?;
    parse_api_key(&raw).ok_or_eyre("GitHub token file is empty")
}

/// Create an HTTP client carrying the GitHub token
fn create_github_client(token: &str) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&f!("token {token}"))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github.v3+json"),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent("soranks-publisher")
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Blob sha of the file on `branch`, or `None` when it does not exist yet
async fn fetch_current_sha(client: &reqwest::Client, url: &str, branch: &str) -> Result<Option<String>> {
    let response = client
        .get(url)
        .query(&[("ref", branch)])
        .send()
        .await
        .context("Failed to query the published file")?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !response.status().is_success() {
        return Err(eyre!("GitHub API returned status: {}", response.status()));
    }

    let file: ContentFile = response
        .json()
        .await
        .context("Failed to parse GitHub contents response")?;

    Ok(Some(file.sha))
}

/// Pushes the Markdown file to `target` in the repository, returning the commit sha
pub async fn publish_markdown(markdown: &Path, target: &str, options: &PublishOptions) -> Result<String> {
    let token = read_token(&options.token_file)?;
    let content = fs::read(markdown).with_context(|| f!("Failed to read {}", markdown.display()))?;

    let client = create_github_client(&token)?;
    let url = contents_url(&options.github_api, &options.github_repo, target);
    trace!("Publishing {} to {} ({})", markdown.display(), url, options.branch);

    let sha = fetch_current_sha(&client, &url, &options.branch).await?;
    if sha.is_none() {
        info!("{target} does not exist on {}, creating it", options.branch);
    }

    let committer = Committer {
        name: options.author_name.clone(),
        email: options.author_email.clone(),
    };
    let request = build_update_request(
        &content,
        commit_message(target, Utc::now()),
        &options.branch,
        &committer,
        sha,
    );

    let response = client
        .put(&url)
        .json(&request)
        .send()
        .await
        .context("Failed to publish to GitHub")?;

    if !response.status().is_success() {
        return Err(eyre!("GitHub API returned status: {}", response.status()));
    }

    let body: UpdateContentResponse = response
        .json()
        .await
        .context("Failed to parse GitHub publish response")?;

    Ok(body.commit.sha)
}
