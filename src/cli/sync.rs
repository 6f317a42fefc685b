use crate::{config::SyncConfig, error, management::TokenManager, success, sync};

pub async fn sync(skip_liked: bool, prune_duplicates: bool) {
    let mut cfg = match SyncConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("Cannot load sync configuration. Err: {}", e),
    };

    if skip_liked {
        cfg.include_liked = false;
    }
    if prune_duplicates {
        cfg.prune_duplicates = true;
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run stashcli auth\n Error: {}",
                e
            );
        }
    };

    match sync::run(&mut token_mgr, &cfg).await {
        Ok(report) => {
            success!(
                "Collected {} items from {} playlists ({} skipped, {} duplicates collapsed)",
                report.collected,
                report.playlists,
                report.skipped,
                report.duplicates
            );
            success!(
                "Master playlist updated: {} added, {} removed, {} duplicate entries pruned",
                report.added,
                report.removed,
                report.pruned
            );
        }
        Err(e) => error!("Sync failed: {}", e),
    }
}
