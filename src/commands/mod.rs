// CLI command handlers
pub mod account;
pub mod dashboard;
pub mod exercises;
pub mod profile;
pub mod workouts;
