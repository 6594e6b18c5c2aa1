pub mod analyze;
pub mod auth;
pub mod dispatch;
pub mod health;
pub mod survey;
