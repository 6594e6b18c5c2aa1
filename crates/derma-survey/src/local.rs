//! File-backed survey store: one JSON document per user.

use std::fs;
use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use derma_core::SurveyData;

use crate::error::SurveyError;
use crate::store::{SurveyStore, validate_username};

const EXTENSION: &str = "json";

/// Surveys stored as `<dir>/<url-encoded username>.json`.
#[derive(Debug, Clone)]
pub struct LocalSurveyStore {
    dir: PathBuf,
}

impl LocalSurveyStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, username: &str) -> Result<PathBuf, SurveyError> {
        let username = validate_username(username)?;
        Ok(self
            .dir
            .join(format!("{}.{EXTENSION}", urlencoding::encode(username))))
    }

    /// # Errors
    ///
    /// `SurveyError::InvalidUser` for an empty username, `Io`/`Json` if the
    /// document exists but cannot be read.
    pub fn read(&self, username: &str) -> Result<Option<SurveyData>, SurveyError> {
        let path = self.path_for(username)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Write atomically: temp file in the same directory, then rename.
    ///
    /// # Errors
    ///
    /// `SurveyError::InvalidUser` for an empty username, `Io` on write failure.
    pub fn write(&self, username: &str, survey: &SurveyData) -> Result<(), SurveyError> {
        let path = self.path_for(username)?;
        fs::create_dir_all(&self.dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, survey)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| SurveyError::Io(e.error))?;

        tracing::debug!(username, path = %path.display(), "survey saved");
        Ok(())
    }

    /// Usernames with a stored survey, sorted.
    ///
    /// # Errors
    ///
    /// `SurveyError::Io` if the directory exists but cannot be listed.
    pub fn list_users(&self) -> Result<Vec<String>, SurveyError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut users = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match urlencoding::decode(stem) {
                Ok(name) => users.push(name.into_owned()),
                Err(error) => tracing::warn!(file = %path.display(), %error, "skipping survey file"),
            }
        }
        users.sort();
        Ok(users)
    }

    /// Remove a user's survey. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// `SurveyError::InvalidUser` or `Io`.
    pub fn delete(&self, username: &str) -> Result<bool, SurveyError> {
        let path = self.path_for(username)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Pretty-printed JSON backup of a user's survey.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`].
    pub fn export(&self, username: &str) -> Result<Option<String>, SurveyError> {
        self.read(username)?
            .map(|survey| serde_json::to_string_pretty(&survey))
            .transpose()
            .map_err(Into::into)
    }

    /// Restore a backup produced by [`Self::export`] (or by the web client).
    ///
    /// # Errors
    ///
    /// `SurveyError::Json` if the document does not parse, otherwise as
    /// [`Self::write`].
    pub fn import(&self, json: &str) -> Result<SurveyData, SurveyError> {
        let survey: SurveyData = serde_json::from_str(json)?;
        self.write(&survey.username, &survey)?;
        Ok(survey)
    }
}

impl SurveyStore for LocalSurveyStore {
    fn load(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<SurveyData>, SurveyError>> + Send {
        std::future::ready(self.read(username))
    }

    fn save(
        &self,
        username: &str,
        survey: &SurveyData,
    ) -> impl Future<Output = Result<(), SurveyError>> + Send {
        std::future::ready(self.write(username, survey))
    }
}
