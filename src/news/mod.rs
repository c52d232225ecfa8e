pub mod fetch;
pub mod model;
pub mod normalize;
pub mod rank;

use crate::cache::{CacheManager, KeyValueStore};
use crate::config::{CACHE_KEY, RuntimeConfig};
use crate::present::{self, DisplaySurface};
use crate::window::Clock;
use fetch::Transport;
use tracing::{info, warn};

pub use model::{FeedSource, NewsItem};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Front page rendered from fresh results; these were also cached.
    Rendered(Vec<NewsItem>),
    /// Nothing from yesterday across all sources.
    Empty,
}

/// One full page load: paint the cache if it has anything, fetch every
/// source, then replace whatever was painted with the fresh result.
///
/// `store` is `None` when caching is disabled. The cache is only written
/// after a non-empty render.
pub async fn run(
    cfg: &RuntimeConfig,
    transport: &dyn Transport,
    clock: &dyn Clock,
    mut store: Option<&mut dyn KeyValueStore>,
    surface: &mut dyn DisplaySurface,
) -> RunOutcome {
    let cache = CacheManager::new(CACHE_KEY, cfg.cache_ttl);

    if let Some(store) = store.as_deref() {
        if let Some(cached) = cache.load(store, clock) {
            // An empty hit paints nothing; the fetch below decides the final state.
            if let Some((first, rest)) = cached.split_first() {
                let shown = cfg.max_items.saturating_sub(1).min(rest.len());
                present::render_featured(surface, first, clock);
                present::render_news(surface, &rest[..shown], clock);
            }
        }
    }

    present::render_updating(surface);
    surface.present();

    let per_source = fetch::fetch_all(
        transport,
        &cfg.proxy_prefix,
        &cfg.feeds,
        cfg.max_items_per_feed,
    )
    .await;

    let ranked = rank::rank(per_source, clock, cfg.max_items);

    let Some((first, rest)) = ranked.split_first() else {
        info!(sources = cfg.feeds.len(), "no items from yesterday");
        present::render_empty(surface);
        surface.present();
        return RunOutcome::Empty;
    };

    present::render_featured(surface, first, clock);
    present::render_news(surface, rest, clock);
    surface.present();
    info!(items = ranked.len(), "front page rendered");

    if let Some(store) = store.as_deref_mut() {
        if let Err(err) = cache.save(store, &ranked, clock.now()) {
            warn!(error = %err, "failed to write cache");
        }
    }

    RunOutcome::Rendered(ranked)
}
