use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

use derma_core::SurveyData;

use crate::error::SurveyError;
use crate::store::{SurveyStore, validate_username};

/// In-process store for tests and anonymous runs.
#[derive(Debug, Default)]
pub struct MemorySurveyStore {
    surveys: Mutex<HashMap<String, SurveyData>>,
    fail_loads: bool,
    loads: AtomicUsize,
}

impl MemorySurveyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose loads always fail, for exercising fallback paths.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_survey(self, survey: SurveyData) -> Self {
        self.surveys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(survey.username.clone(), survey);
        self
    }

    /// Number of `load` calls served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn get(&self, username: &str) -> Result<Option<SurveyData>, SurveyError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads {
            return Err(SurveyError::Io(std::io::Error::other("store unavailable")));
        }
        let username = validate_username(username)?;
        Ok(self
            .surveys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(username)
            .cloned())
    }

    fn put(&self, username: &str, survey: &SurveyData) -> Result<(), SurveyError> {
        let username = validate_username(username)?;
        self.surveys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(username.to_string(), survey.clone());
        Ok(())
    }
}

impl SurveyStore for MemorySurveyStore {
    fn load(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<SurveyData>, SurveyError>> + Send {
        std::future::ready(self.get(username))
    }

    fn save(
        &self,
        username: &str,
        survey: &SurveyData,
    ) -> impl Future<Output = Result<(), SurveyError>> + Send {
        std::future::ready(self.put(username, survey))
    }
}
