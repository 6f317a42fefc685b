//! # API Module
//!
//! This module provides the HTTP endpoints served by the local axum server.
//! Two routers use them: the short-lived callback server spun up during the
//! OAuth flow, and the long-running server behind `stashcli serve`.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server, completing the PKCE flow by exchanging the
//!   authorization code for an access token.
//!
//! ### Invocation
//!
//! - [`sync`] - Runs the full master-playlist sync on request. The request
//!   carries no input; the response is a JSON status with the run's counts,
//!   or a 500 with the error text when the run fails.
//!
//! ### Monitoring
//!
//! - [`health`] - Health check endpoint returning application status and
//!   version information.
//!
//! ## Security Considerations
//!
//! - Uses OAuth 2.0 PKCE flow without exposing client secrets
//! - Authentication failures are reported to the browser, not swallowed
//! - The sync trigger relies on the token cache; it never handles credentials

mod callback;
mod health;
mod sync;

pub use callback::callback;
pub use health::health;
pub use sync::sync;
