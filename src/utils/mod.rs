// Utility functions module
pub mod config;
pub mod formatters;
pub mod metrics;
pub mod streak;
pub mod validators;
