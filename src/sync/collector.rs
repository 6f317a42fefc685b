use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::{
    Res,
    config::SyncConfig,
    info,
    management::TokenManager,
    spotify,
    types::{Playlist, PlaylistItem},
};

/// Everything the collector gathered in one pass over the user's library.
pub struct CollectedLibrary {
    /// Raw items in source order: playlist by playlist, then liked songs.
    pub items: Vec<PlaylistItem>,
    /// Number of playlists that were scanned as track sources.
    pub playlists: usize,
}

/// Enumerates the playlists owned by the authenticated user.
///
/// Drains the paginated playlist listing completely, sleeping the configured
/// delay between consecutive pages, then keeps only playlists whose recorded
/// owner id equals `user_id`. Followed playlists are dropped here.
pub async fn owned_playlists(
    token_mgr: &mut TokenManager,
    user_id: &str,
    cfg: &SyncConfig,
) -> Res<Vec<Playlist>> {
    let mut playlists: Vec<Playlist> = Vec::new();
    let mut next: Option<String> = None;

    loop {
        let token = token_mgr.get_valid_token().await;
        let (page, page_next) = spotify::user::get_playlists_page(&token, next.take()).await?;
        playlists.extend(page);

        match page_next {
            Some(url) => {
                next = Some(url);
                sleep(cfg.page_delay).await;
            }
            None => break,
        }
    }

    playlists.retain(|p| p.owner.id == user_id);
    Ok(playlists)
}

/// Fetches every item of a single playlist.
///
/// Follows the `next` page URLs until the listing is exhausted, with the
/// configured delay between page fetches. Performs no filtering; items with
/// `track: null` flow through to the normalizer.
pub async fn playlist_items(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    cfg: &SyncConfig,
) -> Res<Vec<PlaylistItem>> {
    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut next: Option<String> = None;

    loop {
        let token = token_mgr.get_valid_token().await;
        let (page, page_next) =
            spotify::tracks::get_playlist_tracks_page(&token, playlist_id, next.take()).await?;
        items.extend(page);

        match page_next {
            Some(url) => {
                next = Some(url);
                sleep(cfg.page_delay).await;
            }
            None => break,
        }
    }

    Ok(items)
}

/// Fetches every item of the user's saved-tracks (liked songs) library.
pub async fn saved_items(token_mgr: &mut TokenManager, cfg: &SyncConfig) -> Res<Vec<PlaylistItem>> {
    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut next: Option<String> = None;

    loop {
        let token = token_mgr.get_valid_token().await;
        let (page, page_next) = spotify::tracks::get_saved_tracks_page(&token, next.take()).await?;
        items.extend(page);

        match page_next {
            Some(url) => {
                next = Some(url);
                sleep(cfg.page_delay).await;
            }
            None => break,
        }
    }

    Ok(items)
}

/// Whether a playlist may contribute tracks to the desired set. The master
/// playlist and explicitly excluded playlists never do, even when owned by
/// the user, so the target cannot feed itself.
pub fn is_source(playlist: &Playlist, cfg: &SyncConfig) -> bool {
    playlist.id != cfg.master_playlist_id && !cfg.excluded_playlists.contains(&playlist.id)
}

/// Collects the raw item sequence feeding the desired set.
///
/// Iterates every owned playlist, skipping the master playlist and any
/// explicitly excluded ids so the target never feeds itself, and appends the
/// liked-songs library when configured. Source order is preserved: the first
/// occurrence of a song across this sequence is the representative the
/// normalizer keeps.
pub async fn collect_library(
    token_mgr: &mut TokenManager,
    user_id: &str,
    cfg: &SyncConfig,
) -> Res<CollectedLibrary> {
    let playlists = owned_playlists(token_mgr, user_id, cfg).await?;
    info!("Total user playlists: {}", playlists.len());

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut scanned = 0;

    for playlist in &playlists {
        if !is_source(playlist, cfg) {
            continue;
        }

        pb.set_message(format!("Scanning playlist: {}...", playlist.name));
        let fetched = playlist_items(token_mgr, &playlist.id, cfg).await?;
        items.extend(fetched);
        scanned += 1;
        sleep(cfg.page_delay).await;
    }

    if cfg.include_liked {
        pb.set_message("Scanning Liked Songs...");
        let liked = saved_items(token_mgr, cfg).await?;
        items.extend(liked);
    }

    pb.finish_and_clear();
    info!("Collected {} items from {} playlists", items.len(), scanned);

    Ok(CollectedLibrary {
        items,
        playlists: scanned,
    })
}
