//! # Sync Pipeline Module
//!
//! The core of the application: a single-pass pipeline that rebuilds the
//! master playlist from live Spotify state on every run.
//!
//! ## Stages
//!
//! - [`collector`] - Enumerates the user's owned playlists (excluding the
//!   master playlist and any configured exclusions), drains every track
//!   listing through pagination with a fixed inter-page delay, and
//!   optionally appends the liked-songs library.
//! - [`dedupe`] - The normalizer: filters out items with no resolvable
//!   track, episodes, and local files, then collapses duplicates by the
//!   normalized (name, artist set, album) key, first seen wins.
//! - [`reconciler`] - Fetches the master playlist's current contents,
//!   computes the set difference against the desired set, and applies
//!   removals then additions in batches of at most 100 URIs per call.
//!
//! Stages run strictly in sequence; nothing is persisted between runs, so a
//! re-run after any failure is safe and convergent.

pub mod collector;
pub mod dedupe;
pub mod reconciler;

use std::collections::HashSet;

use crate::{Res, config::SyncConfig, info, management::TokenManager, spotify};

/// Counts reported after a completed sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Owned playlists that contributed tracks.
    pub playlists: usize,
    /// Raw items collected across all sources.
    pub collected: usize,
    /// Unique tracks surviving normalization.
    pub unique: usize,
    /// Items dropped by the filter (unresolvable, episode, local).
    pub skipped: usize,
    /// Items collapsed as cross-source duplicates.
    pub duplicates: usize,
    /// Within-playlist duplicates removed from the master playlist.
    pub pruned: usize,
    /// Tracks removed from the master playlist.
    pub removed: usize,
    /// Tracks added to the master playlist.
    pub added: usize,
}

/// Runs the full collect → normalize → reconcile pipeline against the
/// configured master playlist.
///
/// Authenticates nothing by itself: the caller supplies a loaded
/// [`TokenManager`], which transparently refreshes the access token as
/// needed throughout the run.
///
/// # Errors
///
/// Any API failure aborts the run and propagates; there is no partial-result
/// bookkeeping. Per-item resolution failures are not errors, they show up in
/// the report's `skipped` count.
pub async fn run(token_mgr: &mut TokenManager, cfg: &SyncConfig) -> Res<SyncReport> {
    let token = token_mgr.get_valid_token().await;
    let user = spotify::user::current_user(&token).await?;
    info!(
        "Connected to Spotify as: {}",
        user.display_name.as_deref().unwrap_or(&user.id)
    );

    let library = collector::collect_library(token_mgr, &user.id, cfg).await?;
    let normalized = dedupe::normalize(&library.items);
    info!("Collected {} unique tracks", normalized.uris.len());

    let desired: HashSet<String> = normalized.uris.iter().cloned().collect();

    let token = token_mgr.get_valid_token().await;
    let master = spotify::playlist::get_playlist(&token, &cfg.master_playlist_id).await?;
    info!("Updating master playlist: {}", master.name);

    let outcome =
        reconciler::reconcile(token_mgr, &cfg.master_playlist_id, &desired, cfg).await?;

    Ok(SyncReport {
        playlists: library.playlists,
        collected: library.items.len(),
        unique: normalized.uris.len(),
        skipped: normalized.skipped,
        duplicates: normalized.duplicates,
        pruned: outcome.pruned,
        removed: outcome.removed,
        added: outcome.added,
    })
}
