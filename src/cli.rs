//! CLI argument parsing.
//!
//! The CLI is thin: each command loads config and the feed, then hands off to
//! the renderer, page builder, or session driver.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pkgcat",
    version,
    about = "Render and explore a package catalog feed",
    after_help = "Examples:\n  pkgcat render --feed ./data.json --name fss\n  pkgcat page --feed https://example.org/data.json --out index.html\n  pkgcat session --feed ./data.json --script clicks.txt\n  pkgcat config-stub > config.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// JSON config file (defaults to the per-user config when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Render(RenderArgs),
    Page(PageArgs),
    Session(SessionArgs),
    ConfigStub,
}

/// Feed location shared by every command.
#[derive(Parser, Debug)]
pub struct FeedArgs {
    /// Feed path or http(s) URL (defaults to the configured feed)
    #[arg(long, value_name = "SRC")]
    pub feed: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Print the detail panel for one package")]
pub struct RenderArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Package name
    #[arg(long)]
    pub name: String,

    /// Append relative "N days ago" annotations using the current time
    #[arg(long)]
    pub relative_time: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Write the static catalog page")]
pub struct PageArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Output path (stdout when omitted)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Replay a UI event script and print the table state as JSON")]
pub struct SessionArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Event script (one event per line)
    #[arg(long, value_name = "PATH")]
    pub script: PathBuf,
}
