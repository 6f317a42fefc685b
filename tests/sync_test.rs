use std::{collections::HashSet, time::Duration};

use stashcli::config::SyncConfig;
use stashcli::sync::collector::is_source;
use stashcli::sync::dedupe::{Normalized, TrackKey, duplicate_uris, normalize, playable};
use stashcli::sync::reconciler::{MAX_ITEMS_PER_CALL, batches, diff};
use stashcli::types::{Playlist, PlaylistItem, PlaylistOwner, TrackAlbum, TrackArtist, TrackObject};

// Helper function to create a regular track item
fn track_item(uri: &str, name: &str, artists: &[&str], album: &str) -> PlaylistItem {
    PlaylistItem {
        track: Some(TrackObject {
            uri: uri.to_string(),
            name: name.to_string(),
            kind: "track".to_string(),
            is_local: false,
            artists: artists
                .iter()
                .map(|a| TrackArtist {
                    name: a.to_string(),
                })
                .collect(),
            album: TrackAlbum {
                name: album.to_string(),
            },
        }),
    }
}

// Helper function to create a podcast episode item
fn episode_item(uri: &str, name: &str) -> PlaylistItem {
    PlaylistItem {
        track: Some(TrackObject {
            uri: uri.to_string(),
            name: name.to_string(),
            kind: "episode".to_string(),
            ..Default::default()
        }),
    }
}

// Helper function to create a local file item
fn local_item(name: &str, artists: &[&str], album: &str) -> PlaylistItem {
    let mut item = track_item("", name, artists, album);
    if let Some(track) = item.track.as_mut() {
        track.is_local = true;
        track.uri = format!("spotify:local:::{}:", name);
    }
    item
}

// Helper function to create an unresolvable item (removed track)
fn missing_item() -> PlaylistItem {
    PlaylistItem { track: None }
}

fn uris(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn uri_set(raw: &[&str]) -> HashSet<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_playable_filters() {
    // A regular track passes through
    let regular = track_item("spotify:track:1", "Song A", &["Artist X"], "Album");
    assert!(playable(&regular).is_some());

    // Episodes, local files and unresolvable items do not,
    // regardless of position in the input
    assert!(playable(&episode_item("spotify:episode:2", "Some Podcast")).is_none());
    assert!(playable(&local_item("Bootleg", &["Artist X"], "Album")).is_none());
    assert!(playable(&missing_item()).is_none());
}

#[test]
fn test_normalize_filters_never_emit() {
    let items = vec![
        missing_item(),
        episode_item("spotify:episode:1", "Episode"),
        track_item("spotify:track:1", "Song A", &["Artist X"], "Album"),
        local_item("Local Song", &["Artist Y"], "Album"),
        missing_item(),
    ];

    let result = normalize(&items);

    assert_eq!(result.uris, uris(&["spotify:track:1"]));
    assert_eq!(result.skipped, 4);
    assert_eq!(result.duplicates, 0);
}

#[test]
fn test_normalize_collapses_case_and_artist_order() {
    let items = vec![
        track_item(
            "spotify:track:1",
            "Song A",
            &["Artist X", "Artist Y"],
            "Album",
        ),
        // Case variant with reversed artist order collapses to the same key
        track_item(
            "spotify:track:2",
            "song a",
            &["artist y", "ARTIST X"],
            "ALBUM",
        ),
    ];

    let result = normalize(&items);

    // First-seen identifier survives
    assert_eq!(result.uris, uris(&["spotify:track:1"]));
    assert_eq!(result.duplicates, 1);
}

#[test]
fn test_normalize_distinguishes_albums() {
    // Same name and artists on different albums are different songs
    let items = vec![
        track_item("spotify:track:1", "Song A", &["Artist X"], "Album One"),
        track_item("spotify:track:2", "Song A", &["Artist X"], "Album Two"),
    ];

    let result = normalize(&items);
    assert_eq!(result.uris.len(), 2);
    assert_eq!(result.duplicates, 0);
}

#[test]
fn test_normalize_first_seen_wins() {
    let items = vec![
        track_item("spotify:track:first", "Song A", &["Artist X"], "Album"),
        track_item("spotify:track:second", "Song A", &["Artist X"], "Album"),
        track_item("spotify:track:third", "Song A", &["Artist X"], "Album"),
    ];

    let result = normalize(&items);

    assert_eq!(result.uris, uris(&["spotify:track:first"]));
    assert_eq!(result.duplicates, 2);
}

#[test]
fn test_normalize_empty_input() {
    let result: Normalized = normalize(&[]);
    assert!(result.uris.is_empty());
    assert_eq!(result.skipped, 0);
    assert_eq!(result.duplicates, 0);
}

#[test]
fn test_track_key_equality() {
    let a = track_item("spotify:track:1", "Song", &["B", "A"], "Album");
    let b = track_item("spotify:track:2", "SONG", &["a", "b"], "album");
    let c = track_item("spotify:track:3", "Song", &["A"], "Album");

    let key_a = TrackKey::of(playable(&a).unwrap());
    let key_b = TrackKey::of(playable(&b).unwrap());
    let key_c = TrackKey::of(playable(&c).unwrap());

    assert_eq!(key_a, key_b);
    assert_ne!(key_a, key_c);
}

#[test]
fn test_duplicate_uris_returns_later_occurrences() {
    let items = vec![
        track_item("spotify:track:1", "Song A", &["Artist X"], "Album"),
        track_item("spotify:track:2", "Song B", &["Artist Y"], "Album"),
        // key duplicates of the first item, different identifiers
        track_item("spotify:track:3", "song a", &["artist x"], "album"),
        track_item("spotify:track:1", "Song A", &["Artist X"], "Album"),
    ];

    let duplicates = duplicate_uris(&items);
    assert_eq!(duplicates, uris(&["spotify:track:3", "spotify:track:1"]));
}

#[test]
fn test_duplicate_uris_ignores_unplayable() {
    let items = vec![
        missing_item(),
        track_item("spotify:track:1", "Song A", &["Artist X"], "Album"),
        missing_item(),
    ];

    assert!(duplicate_uris(&items).is_empty());
}

#[test]
fn test_diff_disjoint_and_exact() {
    let desired = uri_set(&["a", "b", "c"]);
    let current = uri_set(&["b", "c", "d", "e"]);

    let (to_add, to_remove) = diff(&desired, &current);

    let add_set: HashSet<String> = to_add.iter().cloned().collect();
    let remove_set: HashSet<String> = to_remove.iter().cloned().collect();

    assert_eq!(add_set, uri_set(&["a"]));
    assert_eq!(remove_set, uri_set(&["d", "e"]));
    assert!(add_set.is_disjoint(&remove_set));

    // Applying the plan converges the current set on the desired set
    let mut converged = current.clone();
    for uri in &to_remove {
        converged.remove(uri);
    }
    for uri in &to_add {
        converged.insert(uri.clone());
    }
    assert_eq!(converged, desired);
}

#[test]
fn test_diff_identical_sets_is_empty() {
    // Second run with no external changes: nothing to do
    let desired = uri_set(&["a", "b", "c"]);
    let (to_add, to_remove) = diff(&desired, &desired.clone());

    assert!(to_add.is_empty());
    assert!(to_remove.is_empty());
}

#[test]
fn test_batches_boundaries() {
    let empty: Vec<String> = Vec::new();
    assert_eq!(batches(&empty).count(), 0);

    let one: Vec<String> = (0..1).map(|i| format!("uri{}", i)).collect();
    assert_eq!(batches(&one).count(), 1);

    let full: Vec<String> = (0..100).map(|i| format!("uri{}", i)).collect();
    let chunks: Vec<_> = batches(&full).collect();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].len(), MAX_ITEMS_PER_CALL);

    let overflow: Vec<String> = (0..101).map(|i| format!("uri{}", i)).collect();
    let chunks: Vec<_> = batches(&overflow).collect();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].len(), 100);
    assert_eq!(chunks[1].len(), 1);

    let large: Vec<String> = (0..250).map(|i| format!("uri{}", i)).collect();
    let sizes: Vec<usize> = batches(&large).map(|c| c.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}

// Helper function to create a playlist owned by the given user
fn playlist(id: &str, name: &str, owner: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner: PlaylistOwner {
            id: owner.to_string(),
        },
        tracks: None,
    }
}

fn test_config(master: &str, excluded: &[&str]) -> SyncConfig {
    SyncConfig {
        master_playlist_id: master.to_string(),
        include_liked: true,
        prune_duplicates: false,
        excluded_playlists: excluded.iter().map(|s| s.to_string()).collect(),
        page_delay: Duration::from_millis(0),
        merge_source: None,
        merge_target: None,
    }
}

#[test]
fn test_master_playlist_is_never_a_source() {
    let cfg = test_config("master", &["regional"]);

    // The master playlist is skipped even when owned by the user
    assert!(!is_source(&playlist("master", "Stash", "me"), &cfg));

    // Explicitly excluded playlists are skipped too
    assert!(!is_source(&playlist("regional", "Regional Mix", "me"), &cfg));

    // Everything else contributes
    assert!(is_source(&playlist("other", "Jams", "me"), &cfg));
}

#[test]
fn test_master_sync_scenario() {
    // P1 has two songs, P2 repeats the first as a case variant, liked songs
    // add a third unique song. The master currently holds an unrelated song.
    let p1 = vec![
        track_item("spotify:track:a", "Song A", &["Artist X"], "Album"),
        track_item("spotify:track:b", "Song B", &["Artist Y"], "Album"),
    ];
    let p2 = vec![track_item(
        "spotify:track:a2",
        "song a",
        &["artist x"],
        "album",
    )];
    let liked = vec![track_item(
        "spotify:track:c",
        "Song C",
        &["Artist Z"],
        "Album",
    )];

    let mut library = Vec::new();
    library.extend(p1);
    library.extend(p2);
    library.extend(liked);

    let normalized = normalize(&library);
    assert_eq!(normalized.uris.len(), 3);
    assert_eq!(normalized.duplicates, 1);

    let desired: HashSet<String> = normalized.uris.iter().cloned().collect();
    let current = uri_set(&["spotify:track:d"]);

    let (to_add, to_remove) = diff(&desired, &current);

    let add_set: HashSet<String> = to_add.iter().cloned().collect();
    assert_eq!(
        add_set,
        uri_set(&["spotify:track:a", "spotify:track:b", "spotify:track:c"])
    );
    assert_eq!(to_remove, uris(&["spotify:track:d"]));
}
