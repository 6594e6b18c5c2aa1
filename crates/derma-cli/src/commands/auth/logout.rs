use derma_auth::TokenStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    TokenStore::new()?.delete()?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
