use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{PlaylistItem, PlaylistItemsResponse},
};

/// Retrieves one page of a playlist's items.
///
/// Works the same way as the playlist listing: the response's `next` field
/// carries the full URL of the following page, or `None` when the playlist
/// is exhausted. Passing `None` as `page_url` fetches the first page with
/// `limit=100` (the endpoint's maximum).
///
/// Items whose underlying track has been removed or is otherwise unavailable
/// arrive with `track: null` and are returned as-is; filtering them out is
/// the normalizer's job.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify id of the playlist to read
/// * `page_url` - Full URL of the page to fetch, or `None` for the first page
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok((Vec<PlaylistItem>, Option<String>))` - Items of this page and the
///   URL of the next page, if any
/// - `Err(reqwest::Error)` - Network error, API error, or other HTTP-related error
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried in place after a 10-second delay.
/// Other errors are propagated immediately.
pub async fn get_playlist_tracks_page(
    token: &str,
    playlist_id: &str,
    page_url: Option<String>,
) -> Result<(Vec<PlaylistItem>, Option<String>), reqwest::Error> {
    let api_url = page_url.unwrap_or_else(|| {
        format!(
            "{uri}/playlists/{id}/tracks?limit=100",
            uri = &config::spotify_apiurl(),
            id = playlist_id
        )
    });

    fetch_items_page(token, api_url).await
}

/// Retrieves one page of the authenticated user's saved (liked) tracks.
///
/// Saved-track entries share the playlist item shape: a wrapper object with
/// a `track` field. The library endpoint caps `limit` at 50.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `page_url` - Full URL of the page to fetch, or `None` for the first page
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok((Vec<PlaylistItem>, Option<String>))` - Items of this page and the
///   URL of the next page, if any
/// - `Err(reqwest::Error)` - Network error, API error, or other HTTP-related error
pub async fn get_saved_tracks_page(
    token: &str,
    page_url: Option<String>,
) -> Result<(Vec<PlaylistItem>, Option<String>), reqwest::Error> {
    let api_url = page_url
        .unwrap_or_else(|| format!("{uri}/me/tracks?limit=50", uri = &config::spotify_apiurl()));

    fetch_items_page(token, api_url).await
}

async fn fetch_items_page(
    token: &str,
    api_url: String,
) -> Result<(Vec<PlaylistItem>, Option<String>), reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let res = response.json::<PlaylistItemsResponse>().await?;
        return Ok((res.items, res.next));
    }
}
