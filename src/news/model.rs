use time::OffsetDateTime;

pub use crate::config::Feed as FeedSource;

/// One story, normalized from a single feed entry.
///
/// `title` and `link` are never empty; entries lacking either are dropped
/// before a `NewsItem` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: String,
    pub date: Option<OffsetDateTime>,
}

impl NewsItem {
    /// Unix milliseconds used for ranking; dateless items rank as the epoch.
    pub fn sort_key(&self) -> i128 {
        self.date
            .map(|d| d.unix_timestamp_nanos() / 1_000_000)
            .unwrap_or(0)
    }
}
