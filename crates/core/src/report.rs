//! JSON and Markdown rendering of the ranked list

use serde::Serialize;

use crate::ranks::RankEntry;

const MARKDOWN_HEADER: &str = "# soranks

[Stackoverflow](http://stackoverflow.com/) rankings by **location**.

### Area{area}


Rank|Name|Rep|Location|Web|Avatar
----|----|---|--------|---|------
";

/// True for the patterns that accept any location
pub fn is_worldwide(pattern: &str) -> bool {
    matches!(pattern, "" | "." | ".*")
}

/// Suffix for the `### Area` heading
pub fn area_label(pattern: &str) -> String {
    if is_worldwide(pattern) {
        ": WorldWide".to_string()
    } else {
        format!(" *pattern*: {pattern}")
    }
}

/// Serializes the ranks as a JSON array indented with a single space
pub fn render_json(ranks: &[RankEntry]) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    ranks.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// One table row
pub fn render_markdown_row(entry: &RankEntry) -> String {
    format!(
        "{}|[{}]({})|{}|{}|{}|![Avatar]({})\n",
        entry.rank,
        entry.display_name,
        entry.link,
        entry.reputation,
        entry.location,
        entry.website_url,
        entry.profile_image
    )
}

/// Full Markdown document: header followed by one row per entry
pub fn render_markdown(ranks: &[RankEntry], pattern: &str) -> String {
    let mut result = MARKDOWN_HEADER.replace("{area}", &area_label(pattern));
    for entry in ranks {
        result.push_str(&render_markdown_row(entry));
    }
    result
}
