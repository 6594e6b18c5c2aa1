use derma_auth::{StoredTokenProvider, TokenStore, decode_expiry};
use derma_config::DermaConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags, config: &DermaConfig) -> anyhow::Result<()> {
    let tokens = StoredTokenProvider::new(
        TokenStore::new()?,
        config.auth.token().map(str::to_string),
    );

    let status = match tokens.resolve() {
        Some((token, source)) => AuthStatusResponse {
            authenticated: true,
            expires_at: decode_expiry(&token).ok().map(|at| at.to_rfc3339()),
            token_source: Some(source.as_str()),
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            expires_at: None,
            token_source: None,
            note: Some("no valid token found; analysis requests will be anonymous".into()),
        },
    };

    output(&status, flags.format)
}
