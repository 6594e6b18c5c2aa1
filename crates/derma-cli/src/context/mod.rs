mod surveys;

pub use surveys::Surveys;

use anyhow::Context;
use derma_auth::{StoredTokenProvider, TokenStore};
use derma_config::{DermaConfig, SurveyBackend};
use derma_survey::{LocalSurveyStore, RemoteSurveyStore};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: DermaConfig,
    pub http: reqwest::Client,
    pub tokens: StoredTokenProvider,
    pub surveys: Surveys,
}

impl AppContext {
    pub fn init(config: DermaConfig) -> anyhow::Result<Self> {
        let http = derma_analysis::build_http_client(&config.api)
            .context("failed to build HTTP client")?;

        let store = TokenStore::new().context("failed to open token store")?;
        let tokens = StoredTokenProvider::new(store, config.auth.token().map(str::to_string));

        let surveys = match config.survey.backend {
            SurveyBackend::Local => {
                let dir = config.survey.resolved_dir().context(
                    "cannot determine home directory for the survey store; set DERMA_SURVEY__DIR",
                )?;
                tracing::debug!(dir = %dir.display(), "using local survey store");
                Surveys::Local(LocalSurveyStore::new(dir))
            }
            SurveyBackend::Remote => {
                let url = config.api.surveys_url();
                tracing::debug!(%url, "using remote survey store");
                Surveys::Remote(RemoteSurveyStore::new(http.clone(), url, tokens.clone()))
            }
        };

        Ok(Self {
            config,
            http,
            tokens,
            surveys,
        })
    }
}
