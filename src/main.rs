use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Command, FeedArgs, PageArgs, RenderArgs, RootArgs, SessionArgs};
use pkgcat::config::{self, CatalogConfig};
use pkgcat::controller::{MemoryClipboard, TableController};
use pkgcat::feed::{load_feed, FeedSource};
use pkgcat::grid::MemoryGrid;
use pkgcat::render::{render_detail, ComrakMarkdown, RenderContext};
use pkgcat::session::{self, SessionReport};
use pkgcat::page;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::ConfigStub => {
            println!("{}", config::config_stub()?);
            Ok(())
        }
        Command::Render(cmd) => run_render(&load_config(args.config.as_deref())?, cmd),
        Command::Page(cmd) => run_page(&load_config(args.config.as_deref())?, cmd),
        Command::Session(cmd) => run_session(&load_config(args.config.as_deref())?, cmd),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    config::resolve_config(path).context("load catalog config")
}

fn feed_source(config: &CatalogConfig, args: &FeedArgs) -> FeedSource {
    FeedSource::parse(args.feed.as_deref().unwrap_or(&config.feed))
}

fn run_render(config: &CatalogConfig, args: RenderArgs) -> Result<()> {
    let source = feed_source(config, &args.feed);
    let records = load_feed(&source, config.feed_timeout())
        .with_context(|| format!("load feed {}", source.describe()))?;
    let record = records
        .iter()
        .find(|record| record.name == args.name)
        .ok_or_else(|| anyhow!("package {:?} not found in feed", args.name))?;
    let markdown = ComrakMarkdown;
    let ctx = RenderContext {
        install: config.install_command(),
        markdown: &markdown,
        now: args.relative_time.then(chrono::Utc::now),
    };
    println!("{}", render_detail(record, &ctx).html);
    Ok(())
}

fn run_page(config: &CatalogConfig, args: PageArgs) -> Result<()> {
    let source = feed_source(config, &args.feed);
    let records = load_feed(&source, config.feed_timeout())
        .with_context(|| format!("load feed {}", source.describe()))?;
    let markdown = ComrakMarkdown;
    let ctx = RenderContext {
        install: config.install_command(),
        markdown: &markdown,
        now: None,
    };
    let html = page::render_page(&records, &ctx, config);
    match &args.out {
        Some(out) => {
            std::fs::write(out, html).with_context(|| format!("write {}", out.display()))?;
            tracing::info!(path = %out.display(), records = records.len(), "page written");
            eprintln!("Wrote catalog page to {}", out.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn run_session(config: &CatalogConfig, args: SessionArgs) -> Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script {}", args.script.display()))?;
    let events = session::parse_script(&script)?;

    let mut controller = TableController::new(
        MemoryGrid::default(),
        MemoryClipboard::default(),
        config.controller_settings(),
    );
    controller.load(feed_source(config, &args.feed), config.feed_timeout());
    let count = session::run_session(&mut controller, events);

    let report = SessionReport {
        events: count,
        table: controller.snapshot(),
        clipboard: controller.clipboard().contents.clone(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize session report")?
    );
    Ok(())
}
