use std::path::PathBuf;

use clap::Subcommand;

/// Survey store commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SurveyCommands {
    /// List users with a stored survey (local store only).
    List,
    /// Show a user's survey.
    Show {
        /// Username.
        user: String,
    },
    /// Import a survey document (JSON, as exported by `survey export`).
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },
    /// Print a user's survey as pretty JSON (local store only).
    Export {
        /// Username.
        user: String,
    },
    /// Delete a user's survey (local store only).
    Delete {
        /// Username.
        user: String,
    },
    /// Print the JSON Schema of survey documents.
    Schema,
}
