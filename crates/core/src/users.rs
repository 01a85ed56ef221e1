use serde::{Deserialize, Serialize};

/// Badge totals attached to every user
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct BadgeCounts {
    #[serde(default)]
    pub bronze: u64,
    #[serde(default)]
    pub silver: u64,
    #[serde(default)]
    pub gold: u64,
}

/// Stack Exchange user as returned by the `/users` endpoint
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SoUser {
    #[serde(default)]
    pub badge_counts: BadgeCounts,
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub is_employee: bool,
    #[serde(default)]
    pub user_type: String,
    pub reputation: u64,
    #[serde(default)]
    pub reputation_change_year: i64,
    #[serde(default)]
    pub reputation_change_quarter: i64,
    #[serde(default)]
    pub reputation_change_month: i64,
    #[serde(default)]
    pub reputation_change_week: i64,
    #[serde(default)]
    pub reputation_change_day: i64,
    #[serde(default)]
    pub creation_date: i64,
    #[serde(default)]
    pub last_modified_date: i64,
    #[serde(default)]
    pub last_access_date: i64,
    pub accept_rate: Option<u64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub display_name: String,
}

/// One page of the `/users` endpoint
///
/// Stack Exchange reports failures (throttling, bad key, ...) with a 4xx status
/// and an error triple instead of `items`. Those fields decode here so the caller
/// can log them; such a page has no items.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct UsersPage {
    #[serde(default)]
    pub items: Vec<SoUser>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub quota_max: u64,
    #[serde(default)]
    pub quota_remaining: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl UsersPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Formats the API error triple, if the page carries one
    pub fn api_error(&self) -> Option<String> {
        self.error_id.map(|id| {
            format!(
                "{} ({}): {}",
                self.error_name.as_deref().unwrap_or("unknown"),
                id,
                self.error_message.as_deref().unwrap_or("")
            )
        })
    }
}

/// Checks the ordering the Rank Filter's early exit depends on
///
/// Returns true when reputations never increase from one user to the next.
pub fn is_reputation_descending(users: &[SoUser]) -> bool {
    users
        .windows(2)
        .all(|pair| pair[0].reputation >= pair[1].reputation)
}
