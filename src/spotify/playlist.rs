use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{
        AddItemsRequest, PlaylistDetailsResponse, RemoveItemUri, RemoveItemsRequest,
        SnapshotResponse,
    },
    warning,
};

/// Retrieves metadata for a single playlist.
///
/// Used to resolve the master playlist's display name for log output before
/// reconciliation starts. Only `id` and `name` are requested.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify id of the playlist
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(PlaylistDetailsResponse)` - Playlist id and name
/// - `Err(reqwest::Error)` - Network error, API error, or other HTTP-related error
pub async fn get_playlist(
    token: &str,
    playlist_id: &str,
) -> Result<PlaylistDetailsResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}?fields=id,name",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

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

        return response.json::<PlaylistDetailsResponse>().await;
    }
}

/// Adds items to a playlist.
///
/// Issues a single `POST /playlists/{id}/tracks` call. The API accepts at
/// most 100 URIs per call; batching larger sets is the reconciler's job.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify id of the playlist to mutate
/// * `uris` - Track URIs to add (≤100)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(SnapshotResponse)` - The new playlist snapshot id
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # Rate Limiting
///
/// 429 Too Many Requests responses are handled by honoring the `Retry-After`
/// header for delays up to 120 seconds and retrying the call. Longer delays
/// produce a warning and the error is propagated.
///
/// # Example
///
/// ```
/// let uris: Vec<String> = vec!["spotify:track:4uLU6hMCjMI75M1A2tKUQC".into()];
/// let snapshot = add_items(&token, "37i9dQZF1DXcBWIGoYBM5M", &uris).await?;
/// ```
pub async fn add_items(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = AddItemsRequest {
        uris: uris.to_vec(),
    };

    loop {
        let client = Client::new();
        let response = client
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if let Some(retry) = retry_after(&response) {
            sleep(Duration::from_secs(retry)).await;
            continue; // retry
        }

        let response = response.error_for_status()?;
        return response.json::<SnapshotResponse>().await;
    }
}

/// Removes all occurrences of items from a playlist.
///
/// Issues a single `DELETE /playlists/{id}/tracks` call with a `tracks` body
/// of URI objects. Every occurrence of each given URI is removed, which is
/// what makes the duplicate-pruning pass effective. The API accepts at most
/// 100 URIs per call; batching larger sets is the reconciler's job.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify id of the playlist to mutate
/// * `uris` - Track URIs to remove (≤100)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(SnapshotResponse)` - The new playlist snapshot id
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # Rate Limiting
///
/// Same `Retry-After` handling as [`add_items`].
pub async fn remove_items(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let body = RemoveItemsRequest {
        tracks: uris
            .iter()
            .map(|uri| RemoveItemUri { uri: uri.clone() })
            .collect(),
    };

    loop {
        let client = Client::new();
        let response = client
            .delete(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if let Some(retry) = retry_after(&response) {
            sleep(Duration::from_secs(retry)).await;
            continue; // retry
        }

        let response = response.error_for_status()?;
        return response.json::<SnapshotResponse>().await;
    }
}

// Returns the number of seconds to wait before retrying, when the response
// is a rate-limit rejection we are willing to absorb.
fn retry_after(response: &reqwest::Response) -> Option<u64> {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    let retry_after = response
        .headers()
        .get("retry-after")?
        .to_str()
        .unwrap_or("0")
        .parse::<u64>()
        .unwrap_or(0);

    if retry_after <= 120 {
        Some(retry_after)
    } else {
        warning!(
            "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
            retry_after
        );
        None
    }
}
