use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use stashcli::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Rebuild the master playlist from all owned playlists
    Sync(SyncOptions),

    /// Add the tracks of one playlist to another (one-directional)
    Merge(MergeOptions),

    /// List owned playlists and their role in the sync
    Playlists,

    /// Run the local HTTP server with a sync trigger endpoint
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Leave liked songs out of this run
    #[clap(long)]
    pub skip_liked: bool,

    /// Remove duplicate entries from the master playlist before diffing
    #[clap(long)]
    pub prune_duplicates: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct MergeOptions {
    /// Source playlist id (defaults to SPOTIFY_MERGE_SOURCE_PLAYLIST_ID)
    #[clap(long)]
    pub from: Option<String>,

    /// Target playlist id (defaults to SPOTIFY_MERGE_TARGET_PLAYLIST_ID)
    #[clap(long)]
    pub into: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Sync(opt) => cli::sync(opt.skip_liked, opt.prune_duplicates).await,
        Command::Merge(opt) => cli::merge(opt.from, opt.into).await,
        Command::Playlists => cli::playlists().await,
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
