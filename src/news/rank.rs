use super::model::NewsItem;
use crate::window::{Clock, is_yesterday};
use std::cmp::Reverse;

/// Merges per-source lists into the ranked front page: only items dated
/// yesterday, newest first, at most `max_items`.
///
/// `sort_by_key` is stable, so equal dates keep their input order and
/// dateless items (never yesterday anyway) would sort last.
pub fn rank(per_source: Vec<Vec<NewsItem>>, clock: &dyn Clock, max_items: usize) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = per_source
        .into_iter()
        .flatten()
        .filter(|item| is_yesterday(item.date, clock))
        .collect();
    items.sort_by_key(|item| Reverse(item.sort_key()));
    items.truncate(max_items);
    items
}
