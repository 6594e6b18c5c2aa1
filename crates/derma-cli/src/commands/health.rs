use anyhow::Context;
use derma_analysis::HttpAnalysisClient;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct HealthResponse {
    url: String,
    healthy: bool,
    service: serde_json::Value,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let url = ctx.config.api.health_url();
    let client = HttpAnalysisClient::with_client(ctx.http.clone(), &ctx.config.api);
    let service = client
        .health()
        .await
        .with_context(|| format!("health check against {url} failed"))?;

    output(
        &HealthResponse {
            url,
            healthy: true,
            service,
        },
        flags.format,
    )
}
