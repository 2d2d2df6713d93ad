// ExerciseDB API client
// Paged exercise list and exercise details for the workout browser

use anyhow::{anyhow, Result};
use lru::LruCache;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::exercise::{ApiEnvelope, Exercise, ExercisePage};
use crate::utils::config::EXERCISE_CACHE_SIZE;

/// ExerciseDB REST client with a small detail cache
pub struct ExerciseDbClient {
    client: reqwest::Client,
    base_url: String,
    cache: Mutex<LruCache<String, Exercise>>,
}

impl ExerciseDbClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let capacity = NonZeroUsize::new(EXERCISE_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// First page of the exercise list
    pub async fn list_exercises(&self, limit: usize) -> Result<ExercisePage> {
        let url = format!("{}/exercises", self.base_url);
        let request = self.client.get(&url).query(&[("limit", limit)]);
        let page: ExercisePage = fetch_data(request, "exercise list").await?;
        self.remember(&page.exercises).await;
        Ok(page)
    }

    /// Follow a `nextPage` URL returned by a previous page
    pub async fn next_page(&self, next_page_url: &str) -> Result<ExercisePage> {
        let page: ExercisePage = fetch_data(self.client.get(next_page_url), "exercise list").await?;
        self.remember(&page.exercises).await;
        Ok(page)
    }

    /// Exercise details by id
    pub async fn get_exercise(&self, exercise_id: &str) -> Result<Exercise> {
        let exercise_id = exercise_id.trim();
        if exercise_id.is_empty() {
            return Err(anyhow!("Workout ID is missing."));
        }

        if let Some(cached) = self.cache.lock().await.get(exercise_id) {
            debug!("Exercise cache hit: {}", exercise_id);
            return Ok(cached.clone());
        }

        let url = format!("{}/exercises/{}", self.base_url, exercise_id);
        let exercise: Exercise = fetch_data(self.client.get(&url), "exercise").await?;
        self.remember(std::slice::from_ref(&exercise)).await;
        Ok(exercise)
    }

    async fn remember(&self, exercises: &[Exercise]) {
        let mut cache = self.cache.lock().await;
        for exercise in exercises {
            cache.put(exercise.exercise_id.clone(), exercise.clone());
        }
    }
}

/// Send a request and unwrap the `{success, data}` envelope
async fn fetch_data<T: DeserializeOwned>(request: reqwest::RequestBuilder, what: &str) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiEnvelope<Value>>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));
        return Err(anyhow!("API request failed: {}", message));
    }

    parse_envelope(&body, what)
}

/// Decode a response body, rejecting `success: false` and missing data
pub fn parse_envelope<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| anyhow!("API response format is not as expected: {}", e))?;

    if !envelope.success {
        return Err(anyhow!(
            envelope
                .message
                .unwrap_or_else(|| format!("Failed to load {}", what))
        ));
    }

    envelope
        .data
        .ok_or_else(|| anyhow!("No {} data in API response", what))
}
