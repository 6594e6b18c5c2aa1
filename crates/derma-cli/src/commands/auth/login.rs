use anyhow::Context;
use chrono::{DateTime, Utc};
use derma_auth::{TokenSource, TokenStore, decode_expiry};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    expires_at: String,
    token_source: Option<&'static str>,
}

pub fn handle(args: &AuthLoginArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let token = args.token.trim();
    let expires_at = check_token(token, Utc::now())?;

    let store = TokenStore::new()?;
    store.store(token)?;
    tracing::debug!(source = ?store.source(), "stored id token");

    output(
        &AuthLoginResponse {
            authenticated: true,
            expires_at: expires_at.to_rfc3339(),
            token_source: store.source().map(TokenSource::as_str),
        },
        flags.format,
    )
}

/// Expiry of `token`, refusing tokens that are already expired.
fn check_token(token: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let expires_at =
        decode_expiry(token).context("auth login: token is not a JWT with an exp claim")?;
    if expires_at <= now {
        anyhow::bail!("auth login: token expired at {}", expires_at.to_rfc3339());
    }
    Ok(expires_at)
}
