use std::path::{Path, PathBuf};

use anyhow::Context;
use derma_core::{SurveyContext, SurveyData};
use derma_survey::{SurveyStore, build_context};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SurveyCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SurveyListResponse {
    dir: PathBuf,
    users: Vec<String>,
}

#[derive(Serialize)]
struct SurveyShowResponse {
    survey: SurveyData,
    context: SurveyContext,
}

#[derive(Serialize)]
struct SurveyImportResponse {
    username: String,
    backend: &'static str,
    saved: bool,
}

#[derive(Serialize)]
struct SurveyDeleteResponse {
    username: String,
    deleted: bool,
}

/// Handle `derma survey <subcommand>`.
pub async fn handle(
    action: &SurveyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SurveyCommands::List => {
            let store = ctx.surveys.local("list")?;
            let users = store.list_users()?;
            output(
                &SurveyListResponse {
                    dir: store.dir().to_path_buf(),
                    users,
                },
                flags.format,
            )
        }
        SurveyCommands::Show { user } => {
            let survey = ctx
                .surveys
                .load(user)
                .await?
                .with_context(|| format!("no survey stored for '{user}'"))?;
            let context = build_context(&survey);
            output(&SurveyShowResponse { survey, context }, flags.format)
        }
        SurveyCommands::Import { file } => {
            let survey = read_survey(file)?;
            ctx.surveys.save(&survey.username, &survey).await?;
            tracing::info!(username = %survey.username, backend = ctx.surveys.backend(), "survey imported");
            output(
                &SurveyImportResponse {
                    username: survey.username,
                    backend: ctx.surveys.backend(),
                    saved: true,
                },
                flags.format,
            )
        }
        SurveyCommands::Export { user } => {
            let json = ctx
                .surveys
                .local("export")?
                .export(user)?
                .with_context(|| format!("no survey stored for '{user}'"))?;
            println!("{json}");
            Ok(())
        }
        SurveyCommands::Delete { user } => {
            let deleted = ctx.surveys.local("delete")?.delete(user)?;
            output(
                &SurveyDeleteResponse {
                    username: user.clone(),
                    deleted,
                },
                flags.format,
            )
        }
        SurveyCommands::Schema => schema(flags),
    }
}

/// Print the JSON Schema of survey documents. Needs no configuration.
pub fn schema(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schemars::schema_for!(SurveyData), flags.format)
}

fn read_survey(path: &Path) -> anyhow::Result<SurveyData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("{} is not a survey document", path.display()))
}
