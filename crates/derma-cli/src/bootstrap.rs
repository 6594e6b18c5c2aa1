use anyhow::Context;
use derma_config::{ApiConfig, DermaConfig, SurveyBackend};

pub fn load_config() -> anyhow::Result<DermaConfig> {
    DermaConfig::load_with_dotenv().context("failed to load derma configuration")
}

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &DermaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &DermaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if config.auth.token().is_none() && has_single_underscore_key(&env_keys, "DERMA_AUTH") {
        warnings.push(
            "auth token appears unset while DERMA_AUTH_* env vars exist. Use double underscores (example: DERMA_AUTH__TOKEN)."
                .to_string(),
        );
    }

    if config.api.base_url == ApiConfig::default().base_url
        && has_single_underscore_key(&env_keys, "DERMA_API")
    {
        warnings.push(
            "api config appears default while DERMA_API_* env vars exist. Use double underscores (example: DERMA_API__BASE_URL)."
                .to_string(),
        );
    }

    if config.survey.backend == SurveyBackend::Local
        && has_single_underscore_key(&env_keys, "DERMA_SURVEY")
    {
        warnings.push(
            "survey config appears default while DERMA_SURVEY_* env vars exist. Use double underscores (example: DERMA_SURVEY__BACKEND)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
