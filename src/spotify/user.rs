use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{CurrentUserResponse, Playlist, UserPlaylistsResponse},
};

/// Retrieves the profile of the authenticated user from the Spotify Web API.
///
/// The user id is what the collector compares playlist owner ids against to
/// keep only playlists the user actually owns, as opposed to playlists that
/// are merely followed.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(CurrentUserResponse)` - User id and display name
/// - `Err(reqwest::Error)` - Network error, API error, or other HTTP-related error
///
/// # Retry Logic
///
/// The function implements automatic retry logic for 502 Bad Gateway errors
/// with a 10-second delay between attempts. Other errors are propagated
/// immediately.
pub async fn current_user(token: &str) -> Result<CurrentUserResponse, reqwest::Error> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

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

        return response.json::<CurrentUserResponse>().await;
    }
}

/// Retrieves one page of the authenticated user's playlists.
///
/// Playlist listings are page-based: every response carries a `next` field
/// holding the full URL of the following page. Passing `None` fetches the
/// first page with `limit=50`; passing the previously returned URL fetches
/// the next one. The caller is responsible for following the chain until
/// `None` comes back, and for pacing consecutive requests.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `page_url` - Full URL of the page to fetch, or `None` for the first page
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok((Vec<Playlist>, Option<String>))` - Playlists of this page and the
///   URL of the next page, if any
/// - `Err(reqwest::Error)` - Network error, API error, or other HTTP-related error
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried in place after a 10-second delay.
///
/// # Example
///
/// ```
/// let (mut playlists, mut next) = get_playlists_page(&token, None).await?;
/// while let Some(url) = next {
///     let (page, page_next) = get_playlists_page(&token, Some(url)).await?;
///     playlists.extend(page);
///     next = page_next;
/// }
/// ```
pub async fn get_playlists_page(
    token: &str,
    page_url: Option<String>,
) -> Result<(Vec<Playlist>, Option<String>), reqwest::Error> {
    let api_url = page_url
        .unwrap_or_else(|| format!("{uri}/me/playlists?limit=50", uri = &config::spotify_apiurl()));

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

        let res = response.json::<UserPlaylistsResponse>().await?;
        return Ok((res.items, res.next));
    }
}
