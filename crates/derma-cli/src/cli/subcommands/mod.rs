mod auth;
mod survey;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use survey::SurveyCommands;
