use anyhow::Result;
use console::Term;
use design_news::cache::{FileStore, KeyValueStore};
use design_news::news::fetch::HttpTransport;
use design_news::news::{self, NewsItem, RunOutcome};
use design_news::open_url::open_url;
use design_news::terminal::TerminalSurface;
use design_news::ui::{self, MenuChoice};
use design_news::util::sanitize::sanitize_for_terminal;
use design_news::{config, window::SystemClock};
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    feeds_override: Option<String>,
    no_proxy: bool,
    no_cache: bool,
    list_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Parse a minimal CLI
    let mut args = Args::default();
    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--feeds" => args.feeds_override = raw.next(),
            "--no-proxy" => args.no_proxy = true,
            "--no-cache" => args.no_cache = true,
            "--list" => args.list_only = true,
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => tracing::warn!(arg = other, "ignoring unknown argument"),
        }
    }

    let mut cfg = config::load(args.feeds_override)?;
    if args.no_proxy {
        cfg.proxy_prefix.clear();
    }

    let transport = HttpTransport::new()?;
    let mut store = match (&cfg.cache_dir, args.no_cache) {
        (Some(dir), false) => Some(FileStore::new(dir)),
        _ => None,
    };
    let mut surface = TerminalSurface::new(cfg.header.clone(), !args.list_only);

    let outcome = news::run(
        &cfg,
        &transport,
        &SystemClock,
        store.as_mut().map(|s| s as &mut dyn KeyValueStore),
        &mut surface,
    )
    .await;

    if let RunOutcome::Rendered(items) = outcome {
        if !args.list_only {
            browse(&items, cfg.open_command.as_deref())?;
        }
    }

    Ok(())
}

fn browse(items: &[NewsItem], open_command: Option<&str>) -> Result<()> {
    if !Term::stdout().is_term() {
        return Ok(());
    }
    let labels: Vec<String> = items
        .iter()
        .map(|it| {
            format!(
                "{} ({})",
                sanitize_for_terminal(&it.title),
                sanitize_for_terminal(&it.source)
            )
        })
        .collect();
    loop {
        match ui::pick_story("\nOpen a story:", &labels)? {
            MenuChoice::Index(i) => {
                if let Some(item) = items.get(i) {
                    if let Err(err) = open_url(&item.link, open_command) {
                        eprintln!("{}", err);
                    }
                }
            }
            MenuChoice::Back | MenuChoice::Quit => return Ok(()),
            MenuChoice::Invalid(msg) => eprintln!("{}", msg),
        }
    }
}

fn init_tracing() {
    // stdout belongs to the front page; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("design-news");
    println!("Usage: design-news [--feeds <path>] [--no-proxy] [--no-cache] [--list]");
    println!("  --feeds <path>   Path to a config.toml (feeds list), a local RSS/Atom XML file, or a feed URL");
    println!("  --no-proxy       Fetch feed URLs directly instead of through the proxy");
    println!("  --no-cache       Neither read nor write the local cache");
    println!("  --list           Print the front page once and exit");
}
