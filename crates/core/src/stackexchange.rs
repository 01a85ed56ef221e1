//! Stack Exchange request construction

pub const DEFAULT_API_URL: &str = "https://api.stackexchange.com/2.2";
pub const DEFAULT_SITE: &str = "stackoverflow";

/// Users per page; 100 is the API maximum
pub const PAGE_SIZE: u32 = 100;

/// Endpoint for the users listing, tolerating a trailing slash on the base URL
pub fn users_url(api_url: &str) -> String {
    format!("{}/users", api_url.trim_end_matches('/'))
}

/// Query parameters for one page of users sorted by descending reputation
pub fn users_query(page: u32, site: &str, key: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", page.to_string()),
        ("pagesize", PAGE_SIZE.to_string()),
        ("order", "desc".to_string()),
        ("sort", "reputation".to_string()),
        ("site", site.to_string()),
    ];

    if let Some(key) = key {
        params.push(("key", key.to_string()));
    }

    params
}

/// Extracts the key from a key file's contents
///
/// Trailing line breaks are dropped; a blank file yields no key.
pub fn parse_api_key(raw: &str) -> Option<String> {
    let key = raw.trim_end_matches(['\n', '\r']);
    if key.trim().is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
