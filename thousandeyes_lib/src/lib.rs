//! ThousandEyes API client library.
//!
//! Provides a typed client for the web transaction test endpoints of the
//! ThousandEyes REST API: create, get, update and delete.

pub mod client;
pub mod error;
pub mod helpers;
pub mod model;
pub mod secret;

pub use client::Client;
pub use error::{ApiError, Error, ErrorBody};
pub use helpers::{get_auth_token, normalize_endpoint, TokenSource};
pub use model::WebTransaction;
pub use secret::{bitwarden, keepassxc, one_password};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
