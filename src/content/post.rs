//! Post record and field normalization

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A lightweight post record.
///
/// Loaded fresh from the content store on every read; never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Stable id: the document filename minus its extension
    pub id: String,

    /// Post title, empty string when the front-matter has none
    pub title: String,

    /// Normalized to `YYYY-MM-DD` when the source date parses; otherwise the
    /// raw front-matter string, unchanged
    pub date: String,

    /// First non-empty body line, trimmed and lowercased
    pub excerpt: String,

    /// Tags in front-matter order, case-sensitive, no dedup
    pub tags: Vec<String>,

    /// Rendered HTML body, present only on posts from
    /// [`ContentLoader::render`](crate::content::ContentLoader::render)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
}

/// Normalize a front-matter date to `YYYY-MM-DD`.
///
/// Accepts a handful of common date and datetime shapes. When nothing
/// parses, the raw input passes through unchanged so the caller still has a
/// value to display; such posts sort and bucket on the raw string.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }

    raw.to_string()
}

/// Derive the preview excerpt: the first non-empty line of the body,
/// trimmed and lowercased. A content-derived preview, not a summary.
pub fn excerpt_of(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_iso_date_is_identity() {
        assert_eq!(normalize_date("2024-03-01"), "2024-03-01");
    }

    #[test]
    fn test_normalize_reformats_variants() {
        assert_eq!(normalize_date("2024/03/01"), "2024-03-01");
        assert_eq!(normalize_date("2024-01-15 10:30:00"), "2024-01-15");
        assert_eq!(normalize_date("2024-01-15T10:30:00+02:00"), "2024-01-15");
    }

    #[test]
    fn test_normalize_falls_back_to_raw() {
        assert_eq!(normalize_date("not-a-date"), "not-a-date");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_excerpt_first_nonempty_line_lowercased() {
        assert_eq!(excerpt_of("\n\n  Hello World\nsecond line"), "hello world");
        assert_eq!(excerpt_of(""), "");
    }
}
