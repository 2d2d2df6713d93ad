// Centralized configuration for FitBuddy

use std::env;
use std::path::PathBuf;

/// Registered accounts list
pub const USERS_KEY: &str = "fitbuddy-users";
/// Session of the logged-in user
pub const CURRENT_USER_KEY: &str = "fitbuddy-current-user";
/// Email waiting for a password reset
pub const RESET_EMAIL_KEY: &str = "reset-email";

pub const DEFAULT_EXERCISE_API_URL: &str = "https://exercisedb-api.vercel.app/api/v1";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Exercises shown at once in the browser
pub const EXERCISE_DISPLAY_LIMIT: usize = 24;
/// Entries shown in each dashboard workout list
pub const DASHBOARD_LIST_LIMIT: usize = 5;
/// Cached exercise detail records
pub const EXERCISE_CACHE_SIZE: usize = 128;

/// Profile document key for a user
pub fn profile_key(email: &str) -> String {
    format!("userData_{}", email)
}

/// Workout log key for a user
pub fn workouts_key(email: &str) -> String {
    format!("loggedWorkouts_{}", email)
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub exercise_api_url: String,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            exercise_api_url: DEFAULT_EXERCISE_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Call after `dotenvy::dotenv()`; unset or unparseable values fall back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("FITBUDDY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            exercise_api_url: env::var("EXERCISE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.exercise_api_url),
            page_size: env::var("FITBUDDY_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(profile_key("jane@x.com"), "userData_jane@x.com");
        assert_eq!(workouts_key("jane@x.com"), "loggedWorkouts_jane@x.com");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.exercise_api_url, DEFAULT_EXERCISE_API_URL);
        assert_eq!(config.page_size, 50);
    }
}
