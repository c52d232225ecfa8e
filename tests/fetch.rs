mod common;

use common::{ScriptedTransport, rss};
use design_news::news::FeedSource;
use design_news::news::fetch::{fetch_all, fetch_feed, parse_items};
use time::Duration;
use time::macros::datetime;

const ATOM: &str = include_str!("fixtures/atom_yesterday.xml");

fn source(name: &str, url: &str) -> FeedSource {
    FeedSource {
        name: name.into(),
        url: url.into(),
    }
}

#[tokio::test]
async fn per_source_cap_keeps_first_entries_in_feed_order() {
    let base = datetime!(2026-10-18 00:00 UTC);
    let titles: Vec<String> = (0..15).map(|i| format!("post{}", i)).collect();
    let entries: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), Some(base + Duration::minutes(i as i64))))
        .collect();
    let transport = ScriptedTransport::new().ok("https://a.example/feed", rss("a", &entries));

    let items = fetch_feed(&transport, "", &source("A", "https://a.example/feed"), 10).await;

    assert_eq!(items.len(), 10);
    let got: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    let want: Vec<_> = titles.iter().take(10).map(String::as_str).collect();
    assert_eq!(got, want);
    assert!(items.iter().all(|i| i.source == "A"));
}

#[tokio::test]
async fn requests_go_through_the_proxy_prefix() {
    let proxied = "https://proxy.example/raw?url=https%3A%2F%2Fa.example%2Ffeed";
    let transport = ScriptedTransport::new().ok(proxied, rss("a", &[("one", None)]));

    let items = fetch_feed(
        &transport,
        "https://proxy.example/raw?url=",
        &source("A", "https://a.example/feed"),
        10,
    )
    .await;

    assert_eq!(items.len(), 1);
    assert_eq!(*transport.requested.lock().unwrap(), vec![proxied.to_string()]);
}

#[tokio::test]
async fn failures_degrade_to_empty_lists() {
    let transport = ScriptedTransport::new()
        .fail("https://down.example")
        .status("https://500.example", 500)
        .ok("https://html.example", "<html><body>not a feed</body></html>".into())
        .ok("https://good.example", rss("good", &[("kept", None)]));
    let sources = [
        source("Down", "https://down.example"),
        source("Broken", "https://500.example"),
        source("Html", "https://html.example"),
        source("Good", "https://good.example"),
    ];

    let results = fetch_all(&transport, "", &sources, 10).await;

    assert_eq!(results.len(), 4);
    assert!(results[0].is_empty());
    assert!(results[1].is_empty());
    assert!(results[2].is_empty());
    assert_eq!(results[3].len(), 1);
}

#[test]
fn atom_entries_use_alternate_link_and_updated_fallback() {
    let items = parse_items(ATOM.as_bytes(), "Design Notes", 10).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].link, "https://notes.example/container-queries");
    assert_eq!(items[0].date, Some(datetime!(2026-10-18 15:00 UTC)));
    assert_eq!(items[1].title, "Only updated");
    assert_eq!(items[1].date, Some(datetime!(2026-10-18 12:30 UTC)));
}
