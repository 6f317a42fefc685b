use crate::{config::SyncConfig, error, management::TokenManager, success, sync::reconciler};

pub async fn merge(from: Option<String>, into: Option<String>) {
    let cfg = match SyncConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("Cannot load sync configuration. Err: {}", e),
    };

    // CLI flags win over the configured defaults
    let source = match from.or_else(|| cfg.merge_source.clone()) {
        Some(id) => id,
        None => error!("No source playlist. Pass --from or set SPOTIFY_MERGE_SOURCE_PLAYLIST_ID."),
    };
    let target = match into.or_else(|| cfg.merge_target.clone()) {
        Some(id) => id,
        None => error!("No target playlist. Pass --into or set SPOTIFY_MERGE_TARGET_PLAYLIST_ID."),
    };

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run stashcli auth\n Error: {}",
                e
            );
        }
    };

    match reconciler::merge(&mut token_mgr, &source, &target, &cfg).await {
        Ok(added) => success!("Merged {} tracks into {}", added, target),
        Err(e) => error!("Merge failed: {}", e),
    }
}
