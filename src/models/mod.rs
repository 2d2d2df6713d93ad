// Data models
pub mod account;
pub mod exercise;
pub mod numeric;
pub mod profile;
pub mod schema;
pub mod workout_log;
