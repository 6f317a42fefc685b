use std::collections::HashSet;

use crate::types::{PlaylistItem, TrackObject};

/// Canonical identity of a song, independent of its Spotify id.
///
/// Two tracks with the same lowercased name, the same set of lowercased
/// artist names, and the same lowercased album name are considered the same
/// song, regardless of differing ids (regional variants, re-uploads). Artist
/// names are sorted so artist ordering in the source data never produces
/// distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    name: String,
    artists: Vec<String>,
    album: String,
}

impl TrackKey {
    pub fn of(track: &TrackObject) -> Self {
        let mut artists: Vec<String> = track
            .artists
            .iter()
            .map(|artist| artist.name.to_lowercase())
            .collect();
        artists.sort();

        TrackKey {
            name: track.name.to_lowercase(),
            artists,
            album: track.album.name.to_lowercase(),
        }
    }
}

/// Returns the usable track behind an item, or `None` when the item should
/// be dropped: no resolvable track object, a non-track type (podcast
/// episodes), a local file without a stable URI, or an empty URI.
pub fn playable(item: &PlaylistItem) -> Option<&TrackObject> {
    let track = item.track.as_ref()?;
    if track.kind != "track" || track.is_local || track.uri.is_empty() {
        return None;
    }
    Some(track)
}

/// Outcome of a normalization pass. Skip and collapse counts are kept
/// observable instead of silently discarding items.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Representative URIs in first-seen order, one per distinct key.
    pub uris: Vec<String>,
    /// Items dropped by the [`playable`] filter.
    pub skipped: usize,
    /// Items collapsed because their key was already represented.
    pub duplicates: usize,
}

/// Collapses a raw item sequence to one representative URI per song.
///
/// Pure and total: malformed items are counted and dropped, never raised.
/// The representative for a key is the first item encountered with that key,
/// so the result is deterministic for a fixed input order.
pub fn normalize(items: &[PlaylistItem]) -> Normalized {
    let mut seen: HashSet<TrackKey> = HashSet::new();
    let mut out = Normalized::default();

    for item in items {
        let Some(track) = playable(item) else {
            out.skipped += 1;
            continue;
        };

        if seen.insert(TrackKey::of(track)) {
            out.uris.push(track.uri.clone());
        } else {
            out.duplicates += 1;
        }
    }

    out
}

/// The "return duplicates" mode of normalization: URIs of every item whose
/// key was already seen earlier in the same sequence.
///
/// Used by the reconciler's pruning pass to find duplicate entries that have
/// accumulated inside the master playlist itself. These are invisible to the
/// set difference, which works on the identifier axis, not the key axis.
pub fn duplicate_uris(items: &[PlaylistItem]) -> Vec<String> {
    let mut seen: HashSet<TrackKey> = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items {
        let Some(track) = playable(item) else {
            continue;
        };

        if !seen.insert(TrackKey::of(track)) {
            duplicates.push(track.uri.clone());
        }
    }

    duplicates
}
