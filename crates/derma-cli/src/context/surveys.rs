use derma_auth::StoredTokenProvider;
use derma_core::SurveyData;
use derma_survey::{LocalSurveyStore, RemoteSurveyStore, SurveyError, SurveyStore};

/// The survey store selected by `survey.backend`.
pub enum Surveys {
    Local(LocalSurveyStore),
    Remote(RemoteSurveyStore<StoredTokenProvider>),
}

impl Surveys {
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote(_) => "remote",
        }
    }

    /// The local store, for operations the remote backend has no endpoint for.
    pub fn local(&self, operation: &str) -> anyhow::Result<&LocalSurveyStore> {
        match self {
            Self::Local(store) => Ok(store),
            Self::Remote(_) => anyhow::bail!(
                "survey {operation} requires the local survey backend (set DERMA_SURVEY__BACKEND=local)"
            ),
        }
    }
}

impl SurveyStore for Surveys {
    async fn load(&self, username: &str) -> Result<Option<SurveyData>, SurveyError> {
        match self {
            Self::Local(store) => store.load(username).await,
            Self::Remote(store) => store.load(username).await,
        }
    }

    async fn save(&self, username: &str, survey: &SurveyData) -> Result<(), SurveyError> {
        match self {
            Self::Local(store) => store.save(username, survey).await,
            Self::Remote(store) => store.save(username, survey).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use derma_auth::{StoredTokenProvider, TokenStore};
    use derma_survey::{LocalSurveyStore, RemoteSurveyStore};

    use super::Surveys;

    #[test]
    fn remote_backend_refuses_local_only_operations() {
        let tokens = StoredTokenProvider::new(TokenStore::file_only("/nonexistent/credentials"), None);
        let remote = Surveys::Remote(RemoteSurveyStore::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/api/v1/auth/surveys",
            tokens,
        ));

        let err = remote.local("list").unwrap_err();
        assert!(err.to_string().contains("survey list requires the local"));
        assert_eq!(remote.backend(), "remote");

        let local = Surveys::Local(LocalSurveyStore::new("/tmp/derma-surveys"));
        assert!(local.local("list").is_ok());
        assert_eq!(local.backend(), "local");
    }
}
