use crate::prelude::*;
use log::{trace, warn};
use soranks_core::stackexchange::{users_query, users_url};
use soranks_core::users::UsersPage;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const USER_AGENT: &str = concat!("soranks/", env!("CARGO_PKG_VERSION"));

/// Produces pages of Stack Exchange users
///
/// Implementations must yield users sorted by descending reputation: the rank
/// filter treats the first user under the threshold as the end of the whole scan.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches one page; `key` is the optional API key
    async fn fetch(&self, page: u32, key: Option<&str>) -> Result<UsersPage, Error>;

    /// Single-pass sources are read once, whatever their `has_more` flag says
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Live `/users` endpoint
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    site: String,
}

impl HttpSource {
    pub fn new(api_url: &str, site: &str) -> Result<Self, Error> {
        // gzip(true) sends `Accept-Encoding: gzip` and inflates gzip bodies transparently
        let client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(f!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: users_url(api_url),
            site: site.to_string(),
        })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, page: u32, key: Option<&str>) -> Result<UsersPage, Error> {
        trace!("GET {} page={} site={}", self.url, page, self.site);

        let response = self
            .client
            .get(&self.url)
            .query(&users_query(page, &self.site, key))
            .send()
            .await
            .map_err(|e| Error::Network(f!("Failed to fetch page {page}: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(f!("Failed to read page {page}: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<UsersPage>(&body)
                .ok()
                .and_then(|page| page.api_error())
                .map(|detail| f!(" - {detail}"))
                .unwrap_or_default();
            return Err(Error::Network(f!(
                "Failed to fetch page {page}: HTTP {status}{detail}"
            )));
        }

        let users: UsersPage = serde_json::from_slice(&body)
            .map_err(|e| Error::Decode(f!("Failed to parse page {page}: {e}")))?;

        if let Some(backoff) = users.backoff {
            warn!("API asked to back off for {backoff} seconds");
        }

        Ok(users)
    }
}

/// Saved API response on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FileSource {
    async fn fetch(&self, _page: u32, _key: Option<&str>) -> Result<UsersPage, Error> {
        read_users_file(&self.path)
    }

    fn is_terminal(&self) -> bool {
        true
    }
}

/// Decodes a whole `/users` response from `path`
pub fn read_users_file(path: &Path) -> Result<UsersPage, Error> {
    let source_error = |reason: String| Error::SourceFile {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| source_error(e.to_string()))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| source_error(e.to_string()))
}
