use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

pub const DEFAULT_PROXY_PREFIX: &str = "https://api.allorigins.win/raw?url=";
pub const CACHE_KEY: &str = "design-news-rss-cache";
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 30;
pub const DEFAULT_MAX_ITEMS: usize = 20;
pub const DEFAULT_MAX_ITEMS_PER_FEED: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Feed {
    pub name: String,
    pub url: String,
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub feeds: Vec<Feed>,
    pub proxy_prefix: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_minutes: Option<u64>,
    pub max_items: Option<usize>,
    pub max_items_per_feed: Option<usize>,
    pub open_command: Option<String>,
    pub header: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub feeds: Vec<Feed>,
    pub proxy_prefix: String,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub max_items: usize,
    pub max_items_per_feed: usize,
    pub open_command: Option<String>,
    pub header: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            proxy_prefix: DEFAULT_PROXY_PREFIX.to_string(),
            cache_dir: default_cache_dir(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_MINUTES * 60),
            max_items: DEFAULT_MAX_ITEMS,
            max_items_per_feed: DEFAULT_MAX_ITEMS_PER_FEED,
            open_command: None,
            header: None,
        }
    }
}

impl RuntimeConfig {
    fn from_app(parsed: AppConfig) -> Self {
        let base = RuntimeConfig::default();
        RuntimeConfig {
            feeds: if parsed.feeds.is_empty() {
                base.feeds
            } else {
                parsed.feeds
            },
            proxy_prefix: parsed.proxy_prefix.unwrap_or(base.proxy_prefix),
            cache_dir: parsed.cache_dir.or(base.cache_dir),
            cache_ttl: parsed
                .cache_ttl_minutes
                .map(|m| Duration::from_secs(m * 60))
                .unwrap_or(base.cache_ttl),
            max_items: parsed.max_items.unwrap_or(base.max_items),
            max_items_per_feed: parsed
                .max_items_per_feed
                .unwrap_or(base.max_items_per_feed),
            open_command: parsed.open_command,
            header: parsed.header,
        }
    }

    fn single_feed(name: String, url: String) -> Self {
        RuntimeConfig {
            feeds: vec![Feed { name, url }],
            ..RuntimeConfig::default()
        }
    }
}

pub fn parse_toml(txt: &str) -> Result<RuntimeConfig> {
    let parsed: AppConfig = toml::from_str(txt)?;
    Ok(RuntimeConfig::from_app(parsed))
}

pub fn load(feeds_override: Option<String>) -> Result<RuntimeConfig> {
    // If an override is provided, try to interpret it:
    if let Some(path_str) = feeds_override {
        let p = PathBuf::from(&path_str);
        if p.is_file() {
            // A TOML is a full config; anything else is a single local feed
            let lc = path_str.to_ascii_lowercase();
            if lc.ends_with(".toml") {
                return read_config_file(&p);
            }
            let name = p
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("local-feed")
                .to_string();
            return Ok(RuntimeConfig::single_feed(name, path_str));
        }
        if path_str.starts_with("http://") || path_str.starts_with("https://") {
            return Ok(RuntimeConfig::single_feed("Custom".into(), path_str));
        }
        anyhow::bail!("--feeds: not a file or http(s) URL: {}", path_str);
    }

    if let Some(path) = default_config_path() {
        if path.is_file() {
            return read_config_file(&path);
        }
    }

    Ok(RuntimeConfig::default())
}

fn read_config_file(path: &std::path::Path) -> Result<RuntimeConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_toml(&txt).with_context(|| format!("failed to parse toml: {}", path.display()))
}

pub fn default_feeds() -> Vec<Feed> {
    [
        ("Smashing Magazine", "https://www.smashingmagazine.com/feed/"),
        ("Nielsen Norman Group", "https://www.nngroup.com/feed/rss/"),
        ("A List Apart", "https://alistapart.com/main/feed/"),
        ("UX Collective", "https://uxdesign.cc/feed"),
        ("Webdesigner Depot", "https://www.webdesignerdepot.com/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| Feed {
        name: name.into(),
        url: url.into(),
    })
    .collect()
}

fn default_config_path() -> Option<PathBuf> {
    xdg_path("XDG_CONFIG_HOME", ".config").map(|p| p.join("config.toml"))
}

fn default_cache_dir() -> Option<PathBuf> {
    xdg_path("XDG_CACHE_HOME", ".cache")
}

fn xdg_path(xdg_var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Ok(xdg) = env::var(xdg_var) {
        let mut p = PathBuf::from(xdg);
        p.push("design-news");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(home_fallback);
        p.push("design-news");
        return Some(p);
    }
    None
}
