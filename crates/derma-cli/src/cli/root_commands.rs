use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, SurveyCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Analyse a face photo from a file or a (replayed) camera.
    Analyze(AnalyzeArgs),
    /// Survey store management.
    Survey {
        #[command(subcommand)]
        action: SurveyCommands,
    },
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Check that the analysis service is up.
    Health,
}

#[derive(Clone, Debug, Args)]
#[command(group(
    ArgGroup::new("image_source")
        .required(true)
        .multiple(true)
        .args(["path", "replay_camera"])
))]
pub struct AnalyzeArgs {
    /// Image file to analyse (JPEG, PNG or WebP, at most 10 MiB). With
    /// `--replay-camera`, used only if the camera is unavailable.
    pub path: Option<PathBuf>,

    /// Capture through the camera path, using this image as the video feed.
    #[arg(long, value_name = "PATH")]
    pub replay_camera: Option<PathBuf>,

    /// Attach the stored survey of this user as analysis context.
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// Do not send a bearer token even if one is stored.
    #[arg(long)]
    pub anonymous: bool,
}
