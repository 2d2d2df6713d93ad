// FitBuddy - Rust Edition
// Profile store, workout log and exercise browser for the FitBuddy fitness tracker

pub mod api;
pub mod features;
pub mod models;
pub mod utils;
