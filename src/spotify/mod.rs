//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! master playlist maintainer: authentication, user and playlist data
//! retrieval, and batched playlist mutation. It handles all HTTP
//! communication, OAuth flows, error handling, and rate limiting, providing
//! a clean Rust interface for the sync pipeline above it.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Sync Pipeline)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── User Operations (Profile, Owned Playlists)
//!     ├── Track Retrieval (Playlist Items, Liked Songs)
//!     └── Playlist Mutation (Add, Remove)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier/challenge generation,
//!   browser launch, local callback server, token exchange and storage.
//! - [`user`] - Current-user profile lookup and paginated listing of the
//!   user's playlists.
//! - [`tracks`] - Paginated retrieval of playlist items and of the user's
//!   saved (liked) tracks.
//! - [`playlist`] - Single-playlist metadata fetch plus the two mutation
//!   operations: add items and remove all occurrences of items, both bounded
//!   at 100 items per call by the API.
//!
//! ## Pagination
//!
//! Playlist and library listings are page-based: every response carries a
//! `next` field holding the full URL of the following page, or `null` when
//! the listing is exhausted. The page functions in [`user`] and [`tracks`]
//! return the items of one page together with that URL; draining a listing
//! (and pacing the requests) is the collector's job.
//!
//! ## Error Handling
//!
//! - **502 Bad Gateway**: retried in place with a 10-second delay.
//! - **429 Too Many Requests**: the `Retry-After` header is honored for
//!   delays up to 120 seconds; longer delays are surfaced as errors.
//! - **Everything else**: propagated as `reqwest::Error` to the caller,
//!   which treats any API failure as fatal for the run.
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile
//! - `GET /me/playlists` - user's playlists with pagination
//! - `GET /me/tracks` - user's saved tracks with pagination
//! - `GET /playlists/{id}` - single playlist metadata
//! - `GET /playlists/{id}/tracks` - playlist items with pagination
//! - `POST /playlists/{id}/tracks` - add items (≤100 per call)
//! - `DELETE /playlists/{id}/tracks` - remove all occurrences (≤100 per call)
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Thread Safety
//!
//! The module is designed for async single-threaded use. All operations use
//! async/await for non-blocking I/O; the only shared state is the
//! `Arc<Mutex<_>>` handed to the OAuth callback handler.

pub mod auth;
pub mod playlist;
pub mod tracks;
pub mod user;
