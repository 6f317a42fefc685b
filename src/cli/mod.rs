//! # CLI Module
//!
//! This module provides the command-line interface layer for Stashcli, the
//! Spotify master playlist maintainer. It implements all user-facing CLI
//! commands and coordinates between the Spotify client, the token cache, and
//! the sync pipeline.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//!   security
//! - [`sync`] - Runs the full collect / normalize / reconcile pipeline
//!   against the configured master playlist and reports the resulting counts
//! - [`merge`] - Add-only merge of one playlist into another, for keeping a
//!   pair of sibling playlists in one-directional lockstep
//! - [`playlists`] - Lists the user's owned playlists in a table, marking
//!   the master playlist and configured exclusions
//! - [`serve`] - Runs the local HTTP server so syncs can be triggered by a
//!   request instead of a terminal
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Sync Pipeline (Collect / Normalize / Reconcile)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each command delegates to the pipeline and Spotify modules while handling
//! user interaction, progress feedback, and error presentation. Fatal
//! failures terminate through the `error!` macro with exit code 1; per-item
//! skips are reported as counts, never as errors.

mod auth;
mod merge;
mod playlists;
mod serve;
mod sync;

pub use auth::auth;
pub use merge::merge;
pub use playlists::playlists;
pub use serve::serve;
pub use sync::sync;
