#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use design_news::news::fetch::{FetchResponse, Transport};
use design_news::present::{DisplaySurface, NewsCard, Page, Slot};
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

/// Serves canned responses per URL and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, std::result::Result<FetchResponse, String>>,
    pub requested: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, url: &str, body: String) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(FetchResponse {
                status: 200,
                body: body.into_bytes(),
            }),
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(FetchResponse {
                status,
                body: b"<html>error</html>".to_vec(),
            }),
        );
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err("connection refused".to_string()));
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(resp)) => Ok(resp.clone()),
            Some(Err(msg)) => Err(anyhow!("{}", msg)),
            None => Err(anyhow!("no route to {}", url)),
        }
    }
}

/// Records a snapshot of the page every time a render pass ends.
#[derive(Default)]
pub struct RecordingSurface {
    pub page: Page,
    pub snapshots: Vec<Page>,
}

impl DisplaySurface for RecordingSurface {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.page.set_text(slot, text);
    }

    fn set_featured_href(&mut self, href: &str) {
        self.page.set_featured_href(href);
    }

    fn clear_list(&mut self) {
        self.page.clear_list();
    }

    fn append_card(&mut self, card: NewsCard) {
        self.page.append_card(card);
    }

    fn present(&mut self) {
        self.snapshots.push(self.page.clone());
    }
}

/// A minimal RSS 2.0 document, one `<item>` per `(title, date)`.
pub fn rss(prefix: &str, items: &[(&str, Option<OffsetDateTime>)]) -> String {
    let mut body = String::from(
        "<?xml version=\"1.0\"?>\n<rss version=\"2.0\"><channel><title>Feed</title><link>https://feed.example</link>\n",
    );
    for (title, date) in items {
        body.push_str(&format!(
            "<item><title>{}</title><link>https://{}.example/{}</link>",
            title,
            prefix,
            title.replace(' ', "-")
        ));
        if let Some(d) = date {
            body.push_str(&format!("<pubDate>{}</pubDate>", d.format(&Rfc2822).unwrap()));
        }
        body.push_str("</item>\n");
    }
    body.push_str("</channel></rss>");
    body
}
