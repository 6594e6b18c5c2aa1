//! Survey store backed by the authenticated REST endpoints.
//!
//! The backend keys surveys by the token's account, so the username passed
//! to `load` only labels log lines; `save` embeds it in the document.

use derma_auth::TokenProvider;
use derma_core::{SURVEY_VERSION, SurveyData};
use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::store::{SurveyStore, validate_username};

#[derive(Deserialize)]
struct SurveyRecord {
    survey_data: SurveyData,
}

#[derive(Serialize)]
struct SurveyCreateRequest<'a> {
    survey_data: &'a SurveyData,
    version: &'static str,
}

pub struct RemoteSurveyStore<P> {
    http: reqwest::Client,
    surveys_url: String,
    tokens: P,
}

impl<P: TokenProvider + Sync> RemoteSurveyStore<P> {
    /// `surveys_url` is the collection endpoint, e.g.
    /// `http://localhost:8000/api/v1/auth/surveys`.
    pub fn new(http: reqwest::Client, surveys_url: impl Into<String>, tokens: P) -> Self {
        Self {
            http,
            surveys_url: surveys_url.into(),
            tokens,
        }
    }

    async fn token(&self) -> Result<String, SurveyError> {
        self.tokens
            .bearer_token()
            .await
            .ok_or(SurveyError::NotAuthenticated)
    }

    async fn fetch_latest(&self, username: &str) -> Result<Option<SurveyData>, SurveyError> {
        let token = self.token().await?;
        let url = format!("{}/latest", self.surveys_url.trim_end_matches('/'));
        let resp = check_response(self.http.get(&url).bearer_auth(token).send().await?).await?;
        let survey = parse_latest(&resp.text().await?)?;
        tracing::debug!(username, found = survey.is_some(), "fetched latest survey");
        Ok(survey)
    }

    async fn create(&self, username: &str, survey: &SurveyData) -> Result<(), SurveyError> {
        let username = validate_username(username)?;
        let token = self.token().await?;

        let survey = stamped(username, survey);
        let body = SurveyCreateRequest::new(&survey);
        check_response(
            self.http
                .post(&self.surveys_url)
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        tracing::debug!(username, "survey uploaded");
        Ok(())
    }
}

impl<'a> SurveyCreateRequest<'a> {
    const fn new(survey_data: &'a SurveyData) -> Self {
        Self {
            survey_data,
            version: SURVEY_VERSION,
        }
    }
}

/// The document as uploaded: `username` always matches the caller's.
fn stamped(username: &str, survey: &SurveyData) -> SurveyData {
    let mut survey = survey.clone();
    survey.username = username.to_string();
    survey
}

impl<P: TokenProvider + Sync> SurveyStore for RemoteSurveyStore<P> {
    async fn load(&self, username: &str) -> Result<Option<SurveyData>, SurveyError> {
        self.fetch_latest(username).await
    }

    async fn save(&self, username: &str, survey: &SurveyData) -> Result<(), SurveyError> {
        self.create(username, survey).await
    }
}

/// `null` or an empty body means the account has no survey yet.
pub(crate) fn parse_latest(body: &str) -> Result<Option<SurveyData>, SurveyError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let record: Option<SurveyRecord> = serde_json::from_str(body)?;
    Ok(record.map(|record| record.survey_data))
}

/// Map non-success statuses to [`SurveyError::Api`], preferring the
/// backend's `detail` message over the raw body.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, SurveyError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or(body);
    Err(SurveyError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_auth::StaticTokenProvider;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn null_latest_means_no_survey() {
        assert!(parse_latest("null").unwrap().is_none());
        assert!(parse_latest("  ").unwrap().is_none());
    }

    #[test]
    fn latest_record_unwraps_survey_data() {
        let body = r#"{
            "id": "6f1c",
            "version": "1.0",
            "survey_data": {
                "username": "ana",
                "basicInfo": {"age": 29},
                "completedAt": "2025-03-02T10:00:00Z"
            },
            "created_at": "2025-03-02T10:00:01Z"
        }"#;
        let survey = parse_latest(body).unwrap().unwrap();
        assert_eq!(survey.username, "ana");
        assert_eq!(survey.basic_info.age, 29);
    }

    #[test]
    fn record_without_survey_data_is_malformed() {
        assert!(matches!(parse_latest(r#"{"id": "x"}"#), Err(SurveyError::Json(_))));
    }

    #[tokio::test]
    async fn check_response_prefers_detail() {
        let err = check_response(mock_response(401, r#"{"detail": "Invalid token"}"#))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SurveyError::Api { status: 401, ref message } if message == "Invalid token"
        ));
    }

    #[tokio::test]
    async fn check_response_falls_back_to_body() {
        let err = check_response(mock_response(502, "Bad Gateway")).await.unwrap_err();
        assert!(matches!(
            err,
            SurveyError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "null")).await.is_ok());
    }

    #[test]
    fn create_body_wraps_the_stamped_survey() {
        let survey: SurveyData = serde_json::from_str(
            r#"{"username": "old-name", "basicInfo": {"age": 29}, "completedAt": "2025-03-02T10:00:00Z"}"#,
        )
        .unwrap();

        let stamped = stamped("ana", &survey);
        let body = serde_json::to_value(SurveyCreateRequest::new(&stamped)).unwrap();

        assert_eq!(body["version"], "1.0");
        assert_eq!(body["survey_data"]["username"], "ana");
        assert_eq!(body["survey_data"]["basicInfo"]["age"], 29);
        assert_eq!(body["survey_data"]["completedAt"], "2025-03-02T10:00:00Z");
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn blank_username_is_refused_before_the_network() {
        let store = RemoteSurveyStore::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/api/v1/auth/surveys",
            StaticTokenProvider::new(Some("tok".into())),
        );
        let survey: SurveyData = serde_json::from_str(
            r#"{"username": "ana", "basicInfo": {"age": 29}, "completedAt": "2025-03-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(matches!(
            store.save("  ", &survey).await,
            Err(SurveyError::InvalidUser(_))
        ));
    }

    #[tokio::test]
    async fn anonymous_requests_are_refused_before_the_network() {
        let store = RemoteSurveyStore::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/api/v1/auth/surveys",
            StaticTokenProvider::anonymous(),
        );
        assert!(matches!(store.load("ana").await, Err(SurveyError::NotAuthenticated)));
    }
}
