pub mod assessments;
pub mod attendance;
pub mod auth;
pub mod core;
pub mod preferences;
pub mod routine;
pub mod sessions;
pub mod tasks;
pub mod users;
