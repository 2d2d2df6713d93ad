// Exercise records from the exercise database API
// Plus the client-side search and filters used by the browser

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Exercise record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub body_parts: Vec<String>,
    #[serde(default)]
    pub equipments: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// One page of the exercise list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePage {
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// `{success, data, message}` wrapper around every API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Browser filter state; empty strings mean "no filter"
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    pub search: String,
    pub body_part: String,
    pub equipment: String,
    pub limit: usize,
}

/// Which list a facet is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    BodyPart,
    Equipment,
}

impl Exercise {
    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .target_muscles
                .iter()
                .any(|m| m.to_lowercase().contains(needle))
    }
}

fn contains_ignore_case(values: &[String], wanted: &str) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(wanted))
}

/// Apply search text (name or target muscle), body part and equipment filters
pub fn filter_exercises<'a>(exercises: &'a [Exercise], filter: &ExerciseFilter) -> Vec<&'a Exercise> {
    let search = filter.search.trim().to_lowercase();
    let body_part = filter.body_part.trim();
    let equipment = filter.equipment.trim();

    let matches = exercises
        .iter()
        .filter(|ex| search.is_empty() || ex.matches_search(&search))
        .filter(|ex| body_part.is_empty() || contains_ignore_case(&ex.body_parts, body_part))
        .filter(|ex| equipment.is_empty() || contains_ignore_case(&ex.equipments, equipment));

    if filter.limit == 0 {
        matches.collect()
    } else {
        matches.take(filter.limit).collect()
    }
}

/// Sorted, de-duplicated, lowercased filter options
pub fn facet_values(exercises: &[Exercise], facet: Facet) -> Vec<String> {
    let values: BTreeSet<String> = exercises
        .iter()
        .flat_map(|ex| match facet {
            Facet::BodyPart => ex.body_parts.iter(),
            Facet::Equipment => ex.equipments.iter(),
        })
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    values.into_iter().collect()
}
