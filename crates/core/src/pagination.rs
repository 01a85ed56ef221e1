//! Page cursor for the users scan
//!
//! Pure state machine behind the driver loop: which page to request next,
//! how many failed fetches have been seen, and when the scan has to stop.

/// Failed fetches tolerated over a whole run
pub const MAX_RETRIES: u32 = 3;

/// Verdict after a failed or empty fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryVerdict {
    /// Request the same page again
    Retry,
    /// Retry ceiling reached, the run must abort
    Exhausted,
}

/// Tracks page numbers and failures across the scan
#[derive(Debug, Clone)]
pub struct PageCursor {
    current: u32,
    last: u32,
    retries: u32,
    max_retries: u32,
    max_pages: u32,
}

impl PageCursor {
    /// Starts at page 1. A `max_pages` of 0 means no page ceiling.
    pub fn new(max_pages: u32) -> Self {
        Self {
            current: 1,
            last: 1,
            retries: 0,
            max_retries: MAX_RETRIES,
            max_pages,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn current_page(&self) -> u32 {
        self.current
    }

    /// Last page that was fully processed (1 before any page completes)
    pub fn last_page(&self) -> u32 {
        self.last
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// True only while the cursor has not advanced past the first page
    ///
    /// After the first advance `last` trails `current` by one for good, so the
    /// API key is read before the first request (and its retries) and then reused.
    pub fn should_refresh_key(&self) -> bool {
        self.last == self.current
    }

    /// Counts a failed or empty fetch. The counter is never reset.
    pub fn record_failure(&mut self) -> RetryVerdict {
        self.retries += 1;
        if self.retries >= self.max_retries {
            RetryVerdict::Exhausted
        } else {
            RetryVerdict::Retry
        }
    }

    /// Moves past the current page and reports whether another one should be fetched
    ///
    /// Stops when the next page number is over the ceiling, the upstream has no
    /// more pages, or the source is single-pass.
    pub fn advance(&mut self, has_more: bool, terminal: bool) -> bool {
        self.last = self.current;
        self.current += 1;

        let over_ceiling = self.max_pages != 0 && self.current > self.max_pages;
        !(over_ceiling || !has_more || terminal)
    }
}
