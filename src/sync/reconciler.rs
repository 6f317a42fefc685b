use std::collections::HashSet;

use tokio::time::sleep;

use crate::{
    Res,
    config::SyncConfig,
    info,
    management::TokenManager,
    spotify,
    sync::{collector, dedupe},
};

/// Documented per-call item limit of the add and remove endpoints.
pub const MAX_ITEMS_PER_CALL: usize = 100;

/// Counts of the mutations applied by one reconciliation.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// Within-playlist duplicate entries removed before the diff.
    pub pruned: usize,
    /// URIs removed because they are no longer in the desired set.
    pub removed: usize,
    /// URIs added because they were missing from the playlist.
    pub added: usize,
}

/// Computes the symmetric difference between the desired and current URI
/// sets: `(to_add, to_remove)`. The two results are disjoint by
/// construction.
pub fn diff(
    desired: &HashSet<String>,
    current: &HashSet<String>,
) -> (Vec<String>, Vec<String>) {
    let to_add: Vec<String> = desired.difference(current).cloned().collect();
    let to_remove: Vec<String> = current.difference(desired).cloned().collect();
    (to_add, to_remove)
}

/// Splits a URI list into mutation-call-sized chunks. An empty list yields
/// no chunks, so no API call is made for it.
pub fn batches(uris: &[String]) -> std::slice::Chunks<'_, String> {
    uris.chunks(MAX_ITEMS_PER_CALL)
}

/// Reconciles the target playlist's contents with the desired URI set.
///
/// Fetches the playlist's full current track list (the master-exclusion
/// filter does not apply here, the master is the explicit target), optionally
/// prunes within-playlist duplicate entries, then applies removals before
/// additions in batches of at most [`MAX_ITEMS_PER_CALL`], sleeping the
/// configured delay between calls.
///
/// After a run with no API errors the playlist's URI set equals `desired`
/// exactly. Running again immediately yields zero mutations.
///
/// # Errors
///
/// The first failing API call aborts the reconciliation; a retried run is
/// idempotent because current state is refetched from scratch.
pub async fn reconcile(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    desired: &HashSet<String>,
    cfg: &SyncConfig,
) -> Res<ReconcileOutcome> {
    let current_items = collector::playlist_items(token_mgr, playlist_id, cfg).await?;

    let mut current: HashSet<String> = current_items
        .iter()
        .filter_map(dedupe::playable)
        .map(|track| track.uri.clone())
        .collect();

    let mut pruned = 0;
    if cfg.prune_duplicates {
        let duplicates = dedupe::duplicate_uris(&current_items);
        pruned = duplicates.len();
        if pruned > 0 {
            info!("Removing {} duplicate entries", pruned);
        }

        for chunk in batches(&duplicates) {
            let token = token_mgr.get_valid_token().await;
            spotify::playlist::remove_items(&token, playlist_id, chunk).await?;
            sleep(cfg.page_delay).await;
        }

        // Pruning removes every occurrence of those URIs, so they are gone
        // from the playlist; the diff below re-adds any that are desired.
        for uri in &duplicates {
            current.remove(uri);
        }
    }

    let (to_add, to_remove) = diff(desired, &current);
    info!("Tracks to add: {}", to_add.len());
    info!("Tracks to remove: {}", to_remove.len());

    // Removals first, so a batch of additions never transiently inflates the
    // playlist past its final size.
    for chunk in batches(&to_remove) {
        let token = token_mgr.get_valid_token().await;
        spotify::playlist::remove_items(&token, playlist_id, chunk).await?;
        sleep(cfg.page_delay).await;
    }

    for chunk in batches(&to_add) {
        let token = token_mgr.get_valid_token().await;
        spotify::playlist::add_items(&token, playlist_id, chunk).await?;
        sleep(cfg.page_delay).await;
    }

    Ok(ReconcileOutcome {
        pruned,
        removed: to_remove.len(),
        added: to_add.len(),
    })
}

/// One-directional, add-only merge of one playlist into another.
///
/// Tracks present in the source playlist (after normalization) but absent
/// from the target are added to the target; nothing is removed and the
/// source playlist is left untouched. Structurally a reconciliation with the
/// removal side forced empty.
///
/// Returns the number of tracks added.
pub async fn merge(
    token_mgr: &mut TokenManager,
    source_id: &str,
    target_id: &str,
    cfg: &SyncConfig,
) -> Res<usize> {
    let source_items = collector::playlist_items(token_mgr, source_id, cfg).await?;
    let desired: HashSet<String> = dedupe::normalize(&source_items).uris.into_iter().collect();

    let target_items = collector::playlist_items(token_mgr, target_id, cfg).await?;
    let current: HashSet<String> = target_items
        .iter()
        .filter_map(dedupe::playable)
        .map(|track| track.uri.clone())
        .collect();

    let (to_add, _) = diff(&desired, &current);
    info!("Tracks to add: {}", to_add.len());

    for chunk in batches(&to_add) {
        let token = token_mgr.get_valid_token().await;
        spotify::playlist::add_items(&token, target_id, chunk).await?;
        sleep(cfg.page_delay).await;
    }

    Ok(to_add.len())
}
