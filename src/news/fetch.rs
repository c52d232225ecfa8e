use super::model::{FeedSource, NewsItem};
use super::normalize::{RawEntry, normalize};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use feed_rs::parser;
use futures_util::StreamExt;
use futures_util::future::join_all;
use reqwest::Client;
use std::{fs, path::Path, time::Duration};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves one URL. Implementations may fail; callers decide what a
/// failure means.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("design-news/0.1")
            .gzip(true)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        if Path::new(url).is_file() {
            let body = fs::read(url)?;
            if body.len() > max_feed_bytes() {
                bail!("feed too large ({} bytes)", body.len());
            }
            return Ok(FetchResponse { status: 200, body });
        }

        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        // Stream with a max size limit
        let mut stream = resp.bytes_stream();
        let mut body: Vec<u8> = Vec::new();
        let max = max_feed_bytes();
        while let Some(chunk) = stream.next().await {
            let c = chunk?;
            if body.len() + c.len() > max {
                return Err(anyhow!("feed too large (>{} bytes)", max));
            }
            body.extend_from_slice(&c);
        }
        Ok(FetchResponse { status, body })
    }
}

/// Builds the URL actually requested for a source: the proxy prefix
/// followed by the percent-encoded target. Local paths and an empty prefix
/// bypass the proxy.
pub fn proxy_url(prefix: &str, url: &str) -> String {
    if prefix.is_empty() || Path::new(url).is_file() {
        return url.to_string();
    }
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("{}{}", prefix, encoded)
}

/// Parses a feed body into at most `cap` normalized items, in feed order.
pub fn parse_items(body: &[u8], source: &str, cap: usize) -> Result<Vec<NewsItem>> {
    let feed = parser::parse(body)?;
    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| normalize(RawEntry::from(entry), source))
        .take(cap)
        .collect())
}

/// Fetches one source. Never fails: every error becomes an empty list.
pub async fn fetch_feed(
    transport: &dyn Transport,
    proxy_prefix: &str,
    source: &FeedSource,
    cap: usize,
) -> Vec<NewsItem> {
    match try_fetch_feed(transport, proxy_prefix, source, cap).await {
        Ok(items) => {
            debug!(source = %source.name, items = items.len(), "feed fetched");
            items
        }
        Err(err) => {
            warn!(source = %source.name, url = %source.url, error = %err, "feed unavailable");
            Vec::new()
        }
    }
}

async fn try_fetch_feed(
    transport: &dyn Transport,
    proxy_prefix: &str,
    source: &FeedSource,
    cap: usize,
) -> Result<Vec<NewsItem>> {
    let resp = transport.fetch(&proxy_url(proxy_prefix, &source.url)).await?;
    if !resp.is_success() {
        bail!("http status {}", resp.status);
    }
    parse_items(&resp.body, &source.name, cap)
}

/// Fetches every source concurrently and waits for all of them. The result
/// has one list per source, in configuration order.
pub async fn fetch_all(
    transport: &dyn Transport,
    proxy_prefix: &str,
    sources: &[FeedSource],
    cap: usize,
) -> Vec<Vec<NewsItem>> {
    let futs = sources
        .iter()
        .map(|s| fetch_feed(transport, proxy_prefix, s, cap));
    join_all(futs).await
}

fn max_feed_bytes() -> usize {
    // 5 MB cap
    5 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_prefix_is_applied_to_encoded_url() {
        assert_eq!(
            proxy_url(
                "https://api.allorigins.win/raw?url=",
                "https://uxdesign.cc/feed"
            ),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fuxdesign.cc%2Ffeed"
        );
    }

    #[test]
    fn empty_prefix_means_direct_fetch() {
        assert_eq!(proxy_url("", "https://uxdesign.cc/feed"), "https://uxdesign.cc/feed");
    }

    #[test]
    fn non_xml_body_is_a_parse_error() {
        assert!(parse_items(b"<html><body>oops</body>", "A", 10).is_err());
        assert!(parse_items(b"", "A", 10).is_err());
    }

    #[test]
    fn rss_items_keep_feed_order() {
        let xml = br#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
<item><title>First</title><link>https://a.example/1</link></item>
<item><title></title><link>https://a.example/skip</link></item>
<item><title>Second</title><link>https://a.example/2</link></item>
</channel></rss>"#;
        let items = parse_items(xml, "A", 10).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn unparsable_pub_date_keeps_item_without_date() {
        let xml = br#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
<item><title>A</title><link>https://a.example/a</link><pubDate>not a date</pubDate></item>
<item><title>B</title><link>https://a.example/b</link><pubDate>Sun, 18 Oct 2026 14:30:00 +0000</pubDate></item>
</channel></rss>"#;
        let items = parse_items(xml, "A", 10).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "A");
        assert_eq!(items[0].date, None);
        assert!(items[1].date.is_some());
    }

    #[test]
    fn success_range() {
        let ok = FetchResponse { status: 204, body: Vec::new() };
        let moved = FetchResponse { status: 301, body: Vec::new() };
        assert!(ok.is_success());
        assert!(!moved.is_success());
    }
}
