// Workout log data model
// Append-only list stored under `loggedWorkouts_{email}`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Format of the optional `time` field
pub const TIME_FORMAT: &str = "%H:%M";

/// One completed or scheduled exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLogEntry {
    pub log_id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    /// YYYY-MM-DD
    pub date: NaiveDate,
    /// HH:mm, start of day when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Caller-supplied part of a log entry; the store assigns the id
#[derive(Debug, Clone, Default)]
pub struct NewWorkoutLog {
    pub exercise_id: String,
    pub exercise_name: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub duration: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

impl WorkoutLogEntry {
    pub fn new(log_id: String, log: NewWorkoutLog) -> Self {
        Self {
            log_id,
            exercise_id: log.exercise_id,
            exercise_name: log.exercise_name,
            date: log.date,
            time: log.time,
            duration: log.duration,
            sets: log.sets,
            reps: log.reps,
            weight: log.weight,
            notes: log.notes,
        }
    }

    /// Start time; a missing or unreadable time counts as 00:00
    pub fn start_time(&self) -> NaiveTime {
        self.time
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t.trim(), TIME_FORMAT).ok())
            .unwrap_or(NaiveTime::MIN)
    }

    /// Effective date-time used to order and partition logs
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time())
    }
}

/// Unique log id: creation millis plus a random suffix
pub fn generate_log_id(now: NaiveDateTime) -> String {
    let suffix: u32 = rand::rng().random();
    format!("log_{}_{:08x}", now.and_utc().timestamp_millis(), suffix)
}
