use tabled::Table;

use crate::{
    config::SyncConfig,
    error,
    management::TokenManager,
    spotify,
    sync::collector,
    types::PlaylistTableRow,
};

pub async fn playlists() {
    let cfg = match SyncConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => error!("Cannot load sync configuration. Err: {}", e),
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

    let token = token_mgr.get_valid_token().await;
    let user = match spotify::user::current_user(&token).await {
        Ok(user) => user,
        Err(e) => error!("Failed to fetch user profile: {}", e),
    };

    let playlists = match collector::owned_playlists(&mut token_mgr, &user.id, &cfg).await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    // sort playlists by name
    let mut sorted_playlists = playlists;
    sorted_playlists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let table_rows: Vec<PlaylistTableRow> = sorted_playlists
        .into_iter()
        .map(|p| {
            let role = if p.id == cfg.master_playlist_id {
                "master".to_string()
            } else if cfg.excluded_playlists.contains(&p.id) {
                "excluded".to_string()
            } else {
                "source".to_string()
            };

            PlaylistTableRow {
                name: p.name,
                tracks: p.tracks.map(|t| t.total).unwrap_or(0),
                id: p.id,
                role,
            }
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
