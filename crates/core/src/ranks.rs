//! Rank Filter
//!
//! Turns pages of users into an ordered list of [`RankEntry`] values. The filter
//! relies on pages arriving in descending reputation order: the first user under
//! the threshold ends the whole scan, not just the current page.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::users::{SoUser, UsersPage};

/// Errors raised while building a [`RankFilter`]
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("Invalid location pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A ranked projection of a single user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub rank: usize,
    pub account_id: u64,
    pub display_name: String,
    pub reputation: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub website_url: String,
    pub link: String,
    pub profile_image: String,
}

impl RankEntry {
    pub fn from_user(rank: usize, user: &SoUser) -> Self {
        Self {
            rank,
            account_id: user.account_id,
            display_name: user.display_name.clone(),
            reputation: user.reputation,
            location: user.location.clone(),
            website_url: user.website_url.clone(),
            link: user.link.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// Why a page scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Page exhausted, the next page may hold more matches
    Continue,
    /// A user under the reputation threshold was reached
    BelowThreshold,
    /// The configured limit of accepted users was reached
    LimitReached,
}

impl ScanOutcome {
    pub fn should_continue(self) -> bool {
        matches!(self, ScanOutcome::Continue)
    }
}

/// Accumulates matching users across pages
#[derive(Debug)]
pub struct RankFilter {
    min_reputation: u64,
    location: Regex,
    limit: usize,
    ranks: Vec<RankEntry>,
}

impl RankFilter {
    /// Builds a filter matching `pattern` case-insensitively against user locations
    ///
    /// A `limit` of 0 means unlimited.
    pub fn new(min_reputation: u64, pattern: &str, limit: usize) -> Result<Self, RankError> {
        let location =
            Regex::new(&format!("(?i){pattern}")).map_err(|source| RankError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            min_reputation,
            location,
            limit,
            ranks: Vec::new(),
        })
    }

    pub fn ranks(&self) -> &[RankEntry] {
        &self.ranks
    }

    pub fn into_ranks(self) -> Vec<RankEntry> {
        self.ranks
    }

    /// Number of users accepted so far
    pub fn count(&self) -> usize {
        self.ranks.len()
    }

    pub fn apply(&mut self, page: &UsersPage) -> ScanOutcome {
        self.apply_with(page, |_| {})
    }

    /// Scans `page` in order, calling `on_accept` for every newly ranked user
    pub fn apply_with<F>(&mut self, page: &UsersPage, mut on_accept: F) -> ScanOutcome
    where
        F: FnMut(&RankEntry),
    {
        for user in &page.items {
            if user.reputation < self.min_reputation {
                return ScanOutcome::BelowThreshold;
            }

            if !self.location.is_match(&user.location) {
                continue;
            }

            let entry = RankEntry::from_user(self.ranks.len() + 1, user);
            on_accept(&entry);
            self.ranks.push(entry);

            if self.limit != 0 && self.ranks.len() >= self.limit {
                return ScanOutcome::LimitReached;
            }
        }

        ScanOutcome::Continue
    }
}

/// Header line for console output, aligned with [`format_term_row`]
pub fn format_term_header() -> String {
    format!("{:>4} {:<30} {:>6} {}", "Rank", "Name", "Rep", "Location")
}

/// Console row for one entry; the API HTML-encodes names and locations
pub fn format_term_row(entry: &RankEntry) -> String {
    format!(
        "{:>4} {:<30} {:>6} {}",
        entry.rank,
        html_escape::decode_html_entities(&entry.display_name),
        entry.reputation,
        html_escape::decode_html_entities(&entry.location)
    )
}
