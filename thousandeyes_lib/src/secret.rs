//! Secret backends for reading the ThousandEyes auth token.
//!
//! Each backend shells out to its vendor CLI. A backend that is not configured,
//! whose CLI is missing, or that prints nothing yields `None`.

use std::process::{Command, Stdio};

/// Non-empty, trimmed value of an env var.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Run a secret CLI and return its trimmed stdout. Stderr is discarded so
/// vendor prompts and diagnostics never reach our output.
fn read_secret(program: &str, args: &[&str], env_extra: &[(&str, &str)]) -> Option<String> {
    let out = Command::new(program)
        .args(args)
        .envs(env_extra.iter().copied())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 1Password CLI (`op read`).
///
/// Configure via:
/// - `THOUSANDEYES_OP_ENTRY_PATH`: `op://Vault/Item`
/// - or `THOUSANDEYES_OP_VAULT` + `THOUSANDEYES_OP_ITEM`
/// - `THOUSANDEYES_OP_FIELD`: field name (default `AUTH_TOKEN`)
pub fn one_password() -> Option<String> {
    let uri = one_password_uri(&env_value, std::env::var("THOUSANDEYES_OP_FIELD").ok())?;
    read_secret("op", &["read", &uri], &[])
}

/// `op://Vault/Item/Field` reference, or `None` when 1Password is not configured.
/// An explicitly empty field disables the backend.
fn one_password_uri(
    env: &dyn Fn(&str) -> Option<String>,
    field: Option<String>,
) -> Option<String> {
    let field = match field {
        Some(f) => f.trim().to_string(),
        None => "AUTH_TOKEN".to_string(),
    };
    if field.is_empty() {
        return None;
    }
    let item_uri = match env("THOUSANDEYES_OP_ENTRY_PATH") {
        Some(path) => path.trim_end_matches('/').to_string(),
        None => format!(
            "op://{}/{}",
            env("THOUSANDEYES_OP_VAULT")?,
            env("THOUSANDEYES_OP_ITEM")?
        ),
    };
    Some(format!("{}/{}", item_uri, field))
}

/// Bitwarden CLI (`bw get password`).
///
/// Configure via:
/// - `THOUSANDEYES_BW_ITEM_ID`: UUID of the login item
/// - `THOUSANDEYES_BW_SESSION`: optional session key, passed on as `BW_SESSION`
pub fn bitwarden() -> Option<String> {
    let (id, session) = bitwarden_item(&env_value)?;
    match session {
        Some(session) => read_secret(
            "bw",
            &["get", "password", &id],
            &[("BW_SESSION", session.as_str())],
        ),
        None => read_secret("bw", &["get", "password", &id], &[]),
    }
}

/// Item ID and optional session key.
fn bitwarden_item(env: &dyn Fn(&str) -> Option<String>) -> Option<(String, Option<String>)> {
    let id = env("THOUSANDEYES_BW_ITEM_ID")?;
    Some((id, env("THOUSANDEYES_BW_SESSION")))
}

/// KeePassXC CLI (`keepassxc-cli show`).
///
/// Configure via:
/// - `THOUSANDEYES_KPXC_DB`: path to the .kdbx database
/// - `THOUSANDEYES_KPXC_ENTRY`: entry title or path
/// - `THOUSANDEYES_KPXC_ATTRIBUTE`: attribute name (default `Password`)
pub fn keepassxc() -> Option<String> {
    let args = keepassxc_args(&env_value)?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    read_secret("keepassxc-cli", &args, &[])
}

fn keepassxc_args(env: &dyn Fn(&str) -> Option<String>) -> Option<Vec<String>> {
    let db = env("THOUSANDEYES_KPXC_DB")?;
    let entry = env("THOUSANDEYES_KPXC_ENTRY")?;
    let attr = env("THOUSANDEYES_KPXC_ATTRIBUTE").unwrap_or_else(|| "Password".to_string());
    Some(vec!["show".to_string(), "-a".to_string(), attr, db, entry])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fake_env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn backends_not_configured() {
        let env = fake_env(&[]);
        assert!(one_password_uri(&env, None).is_none());
        assert!(bitwarden_item(&env).is_none());
        assert!(keepassxc_args(&env).is_none());
    }

    #[test]
    fn one_password_entry_path() {
        let env = fake_env(&[("THOUSANDEYES_OP_ENTRY_PATH", "op://Ops/ThousandEyes/")]);
        assert_eq!(
            one_password_uri(&env, None).as_deref(),
            Some("op://Ops/ThousandEyes/AUTH_TOKEN")
        );
        assert!(one_password_uri(&env, Some("  ".to_string())).is_none());
    }

    #[test]
    fn one_password_vault_and_item() {
        let env = fake_env(&[
            ("THOUSANDEYES_OP_VAULT", "Ops"),
            ("THOUSANDEYES_OP_ITEM", "ThousandEyes"),
        ]);
        assert_eq!(
            one_password_uri(&env, Some("token".to_string())).as_deref(),
            Some("op://Ops/ThousandEyes/token")
        );
        let env = fake_env(&[("THOUSANDEYES_OP_VAULT", "Ops")]);
        assert!(one_password_uri(&env, None).is_none());
    }

    #[test]
    fn bitwarden_session_is_optional() {
        let env = fake_env(&[("THOUSANDEYES_BW_ITEM_ID", "abc")]);
        assert_eq!(bitwarden_item(&env), Some(("abc".to_string(), None)));
    }

    #[test]
    fn keepassxc_default_attribute() {
        let env = fake_env(&[
            ("THOUSANDEYES_KPXC_DB", "/tmp/te.kdbx"),
            ("THOUSANDEYES_KPXC_ENTRY", "ThousandEyes"),
        ]);
        assert_eq!(
            keepassxc_args(&env).unwrap(),
            vec!["show", "-a", "Password", "/tmp/te.kdbx", "ThousandEyes"]
        );
    }

    #[test]
    fn missing_program_yields_none() {
        assert!(read_secret("thousandeyes-no-such-binary", &[], &[]).is_none());
    }
}
