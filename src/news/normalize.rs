use super::model::NewsItem;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::OffsetDateTime;

/// The fields of one syndication entry the pipeline cares about, before
/// validation. RSS `pubDate` and Atom `published` both land in `published`.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<OffsetDateTime>,
    pub updated: Option<OffsetDateTime>,
}

impl From<feed_rs::model::Entry> for RawEntry {
    fn from(entry: feed_rs::model::Entry) -> Self {
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().unwrap_or("") == "alternate")
            .or_else(|| entry.links.first())
            .map(|l| l.href.clone());
        RawEntry {
            title: entry.title.map(|t| t.content),
            link,
            published: entry.published.and_then(from_chrono),
            updated: entry.updated.and_then(from_chrono),
        }
    }
}

fn from_chrono(d: chrono::DateTime<chrono::Utc>) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(d.timestamp_nanos_opt()?)).ok()
}

/// Turns a raw entry into a `NewsItem`, or `None` when title or link is
/// blank. A missing date keeps the item; it just never passes the
/// yesterday filter.
pub fn normalize(entry: RawEntry, source: &str) -> Option<NewsItem> {
    let title = non_blank(entry.title)?;
    let link = non_blank(entry.link)?;
    Some(NewsItem {
        title,
        link,
        source: source.to_string(),
        date: entry.published.or(entry.updated),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    let v = value?;
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lenient timestamp parsing: RFC 3339 first, then RFC 2822.
pub fn parse_date(value: &str) -> Option<OffsetDateTime> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    OffsetDateTime::parse(s, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(s, &Rfc2822))
        .ok()
}
