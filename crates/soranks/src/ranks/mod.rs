use crate::prelude::*;
use log::{info, trace, warn};
use soranks_core::ranks::RankFilter;
use soranks_core::stackexchange::{DEFAULT_API_URL, DEFAULT_SITE};
use std::path::PathBuf;

pub mod driver;
pub mod key;
pub mod publish;
pub mod report;
pub mod source;

use driver::{scan, ScanSettings};
use publish::PublishOptions;
use source::{FileSource, HttpSource, PageSource};

/// Options for building a ranking
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Top 20 users in Spain, printed as they are found:
  soranks --location 'spain|españa' --term

  # Everyone over 500 reputation, no limit, written as JSON and Markdown:
  soranks --limit 0 --jsonrsp ranks.json --mdrsp ranks.md

  # Rank a saved API response instead of calling the API:
  soranks --json users.json --location berlin --mdrsp berlin.md

  # Publish the Markdown ranking to the repository:
  soranks --location spain --mdrsp README.md --publish spain/README.md

NOTES:
  - The API key is read from --key-file; without it the anonymous quota applies
  - Publishing needs --mdrsp and a GitHub token in --token-file")]
pub struct RankOptions {
    /// Location regular expression, matched case-insensitively
    #[arg(long, env = "SORANKS_LOCATION", default_value = ".")]
    pub location: String,

    /// Read users from a local JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write the ranking as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub jsonrsp: Option<PathBuf>,

    /// Write the ranking as Markdown to this file
    #[arg(long, value_name = "FILE")]
    pub mdrsp: Option<PathBuf>,

    /// Maximum number of users to rank (0 means unlimited)
    #[arg(long, env = "SORANKS_LIMIT", default_value = "20")]
    pub limit: usize,

    /// Print users on the terminal as they are found
    #[arg(long)]
    pub term: bool,

    /// Repository path to publish the Markdown ranking to (requires --mdrsp)
    #[arg(long, value_name = "PATH")]
    pub publish: Option<String>,

    /// Users below this reputation end the scan
    #[arg(long, env = "SORANKS_MIN_REPUTATION", default_value = "500")]
    pub min_reputation: u64,

    /// Maximum number of pages to request (0 means unlimited)
    #[arg(long, env = "SORANKS_MAX_PAGES", default_value = "1100")]
    pub max_pages: u32,

    /// File holding the Stack Exchange API key
    #[arg(long, env = "SORANKS_KEY_FILE", default_value = "./_secret/api.key")]
    pub key_file: PathBuf,

    /// Stack Exchange API base URL
    #[arg(long, env = "SORANKS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Stack Exchange site identifier
    #[arg(long, env = "SORANKS_SITE", default_value = DEFAULT_SITE)]
    pub site: String,

    #[clap(flatten)]
    pub github: PublishOptions,
}

/// Module entry point
pub async fn run(options: RankOptions) -> Result<(), Error> {
    check_options(&options)?;

    match options.json.clone() {
        Some(path) => {
            info!("Extracting from source JSON file.");
            run_with_source(&options, &FileSource::new(path)).await
        }
        None => {
            let source = HttpSource::new(&options.api_url, &options.site)?;
            run_with_source(&options, &source).await
        }
    }
}

/// Rejects flag combinations that cannot produce a result, before any source is opened
fn check_options(options: &RankOptions) -> Result<(), Error> {
    if options.publish.is_some() && options.mdrsp.is_none() {
        return Err(Error::PublishRequiresMarkdown);
    }
    Ok(())
}

/// Validates the options, scans `source` and writes the requested outputs
pub async fn run_with_source<S: PageSource>(options: &RankOptions, source: &S) -> Result<(), Error> {
    trace!("location: {}", options.location);
    trace!("json: {:?}", options.json);
    trace!("jsonrsp: {:?}", options.jsonrsp);
    trace!("mdrsp: {:?}", options.mdrsp);
    trace!("limit: {}", options.limit);
    trace!("term: {}", options.term);
    trace!("publish: {:?}", options.publish);

    check_options(options)?;

    let filter = RankFilter::new(options.min_reputation, &options.location, options.limit)?;
    let settings = ScanSettings {
        max_pages: options.max_pages,
        key_file: &options.key_file,
        term: options.term,
    };

    let scanned = scan(source, filter, &settings).await?;

    if scanned.ranks.is_empty() {
        warn!("No results found.");
        return Ok(());
    }

    if let Some(path) = &options.jsonrsp {
        report::write_json(path, &scanned.ranks)?;
    }

    if let Some(path) = &options.mdrsp {
        report::write_markdown(path, &scanned.ranks, &options.location)?;

        if let Some(target) = &options.publish {
            match publish::publish_markdown(path, target, &options.github).await {
                Ok(commit) => info!("Published {} to {} ({commit})", path.display(), target),
                Err(err) => log::error!("Publish failed: {err:#}"),
            }
        }
    }

    info!("{:04} pages requested.", scanned.pages_requested);
    info!("{:04} users found.", scanned.ranks.len());

    Ok(())
}
