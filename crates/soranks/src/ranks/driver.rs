//! Pagination loop: fetch, filter, advance, retry.

use crate::prelude::{println, *};
use colored::Colorize;
use log::{debug, info, trace, warn};
use soranks_core::pagination::{PageCursor, RetryVerdict};
use soranks_core::ranks::{format_term_header, format_term_row, RankEntry, RankFilter};
use soranks_core::users::is_reputation_descending;
use std::path::Path;

use super::key::load_api_key;
use super::source::PageSource;

pub struct ScanSettings<'a> {
    /// Page ceiling, 0 for none
    pub max_pages: u32,
    pub key_file: &'a Path,
    /// Print accepted users as they are found
    pub term: bool,
}

#[derive(Debug)]
pub struct ScanReport {
    pub ranks: Vec<RankEntry>,
    /// Pages that were fetched and filtered successfully
    pub pages_requested: u32,
}

struct TermPrinter {
    enabled: bool,
    header_printed: bool,
}

impl TermPrinter {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            header_printed: false,
        }
    }

    fn print(&mut self, entry: &RankEntry) {
        if !self.enabled {
            return;
        }
        if !self.header_printed {
            println!("{}", "User data:".bright_cyan().bold());
            println!("{}", format_term_header().bold());
            self.header_printed = true;
        }
        println!("{}", format_term_row(entry));
    }
}

/// Scans `source` page by page until the filter, the source or the page ceiling stops it
///
/// Failed or empty fetches are retried on the same page; the third one over the
/// whole run aborts with [`Error::RetriesExhausted`]. Errors from a terminal
/// (single-pass) source are returned as-is without retrying.
pub async fn scan<S: PageSource>(
    source: &S,
    mut filter: RankFilter,
    settings: &ScanSettings<'_>,
) -> Result<ScanReport, Error> {
    let mut cursor = PageCursor::new(settings.max_pages);
    let mut printer = TermPrinter::new(settings.term);
    let mut key: Option<String> = None;
    let mut pages_requested = 0;

    loop {
        let page = if source.is_terminal() {
            source.fetch(cursor.current_page(), None).await?
        } else {
            if cursor.should_refresh_key() {
                info!("Trying to extract API key.");
                key = load_api_key(settings.key_file);
            }

            trace!("Requesting page: {}", cursor.current_page());

            match source.fetch(cursor.current_page(), key.as_deref()).await {
                Ok(page) if !page.is_empty() => page,
                outcome => {
                    match outcome {
                        Err(err) => warn!("Can't stream data: {err}"),
                        Ok(page) => warn!(
                            "Can't stream data: page {} is empty{}",
                            cursor.current_page(),
                            page.api_error()
                                .map(|detail| f!(" ({detail})"))
                                .unwrap_or_default()
                        ),
                    }

                    if cursor.record_failure() == RetryVerdict::Exhausted {
                        return Err(Error::RetriesExhausted(cursor.retries()));
                    }
                    continue;
                }
            }
        };

        pages_requested += 1;
        trace!(
            "Page users: {} (quota {}/{})",
            page.items.len(),
            page.quota_remaining,
            page.quota_max
        );

        if !is_reputation_descending(&page.items) {
            warn!(
                "Page {} is not sorted by descending reputation; results may be incomplete",
                cursor.current_page()
            );
        }

        let outcome = filter.apply_with(&page, |entry| printer.print(entry));
        if !outcome.should_continue() {
            debug!("Scan stopped on page {}: {:?}", cursor.current_page(), outcome);
            break;
        }

        if !cursor.advance(page.has_more, source.is_terminal()) {
            debug!("No more pages after page {}", cursor.last_page());
            break;
        }
    }

    Ok(ScanReport {
        ranks: filter.into_ranks(),
        pages_requested,
    })
}
