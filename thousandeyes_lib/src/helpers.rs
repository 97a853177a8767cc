//! Helpers for auth token resolution and endpoint configuration.

use chrono::{DateTime, NaiveDateTime, Utc};
use url::Url;

const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source from which the auth token was obtained (for diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    OnePassword,
    Bitwarden,
    Keepassxc,
}

/// Get the auth token from a secret backend only (1Password, Bitwarden, KeePassXC).
///
/// Plain-text tokens (env vars or CLI) are not supported. Configure one
/// backend via its env vars (see [crate::secret]):
/// - 1Password: `THOUSANDEYES_OP_ENTRY_PATH` or `THOUSANDEYES_OP_VAULT` + `THOUSANDEYES_OP_ITEM`.
/// - Bitwarden: `THOUSANDEYES_BW_ITEM_ID`; optional `THOUSANDEYES_BW_SESSION`.
/// - KeePassXC: `THOUSANDEYES_KPXC_DB`, `THOUSANDEYES_KPXC_ENTRY`.
pub fn get_auth_token() -> Result<(String, TokenSource), String> {
    let backends: [(fn() -> Option<String>, TokenSource); 3] = [
        (crate::secret::one_password, TokenSource::OnePassword),
        (crate::secret::bitwarden, TokenSource::Bitwarden),
        (crate::secret::keepassxc, TokenSource::Keepassxc),
    ];
    backends
        .iter()
        .find_map(|(lookup, source)| lookup().map(|token| (token, *source)))
        .ok_or_else(|| {
            "Auth token not found. Configure a secret backend: THOUSANDEYES_OP_ENTRY_PATH (1Password), \
             THOUSANDEYES_BW_ITEM_ID (Bitwarden), or THOUSANDEYES_KPXC_DB+THOUSANDEYES_KPXC_ENTRY (KeePassXC)."
                .to_string()
        })
}

/// Validate an http(s) base URL and strip trailing slashes.
pub fn normalize_endpoint(endpoint: &str) -> Result<String, String> {
    let trimmed = endpoint.trim();
    let parsed =
        Url::parse(trimmed).map_err(|e| format!("Invalid API endpoint {}: {}", trimmed, e))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(format!(
                "Invalid API endpoint {}: unsupported scheme {}",
                trimmed, other
            ))
        }
    }
    if parsed.query().is_some() {
        return Err(format!(
            "Invalid API endpoint {}: query strings are not allowed",
            trimmed
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Parse the `createdDate` format used by the API (`2020-02-06 15:28:07`, UTC).
pub fn parse_created_date(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(s.trim(), CREATED_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| e.to_string())
}
