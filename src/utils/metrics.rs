// Derived metrics
// Values computed from stored fields on every render and never persisted

use chrono::NaiveDateTime;
use std::cmp::Reverse;
use std::fmt;

use crate::models::numeric::Numeric;
use crate::models::profile::DayActivity;
use crate::models::workout_log::WorkoutLogEntry;

/// Body mass index, or the `-` placeholder when it cannot be computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bmi {
    Value(f64),
    Unavailable,
}

impl Bmi {
    pub fn value(&self) -> Option<f64> {
        match self {
            Bmi::Value(v) => Some(*v),
            Bmi::Unavailable => None,
        }
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bmi::Value(v) => write!(f, "{:.1}", v),
            Bmi::Unavailable => f.write_str("-"),
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// weight / (height in metres)^2, rounded to one decimal
pub fn bmi(weight_kg: Numeric, height_cm: Numeric) -> Bmi {
    let (Some(weight), Some(height)) = (weight_kg.as_f64(), height_cm.as_f64()) else {
        return Bmi::Unavailable;
    };
    if !weight.is_finite() || !height.is_finite() || weight <= 0.0 || height <= 0.0 {
        return Bmi::Unavailable;
    }

    let metres = height / 100.0;
    let value = weight / (metres * metres);
    if value.is_finite() {
        Bmi::Value(round_to_tenth(value))
    } else {
        Bmi::Unavailable
    }
}

pub fn bmi_category(bmi: Bmi) -> &'static str {
    match bmi.value() {
        None => "",
        Some(v) if v < 18.5 => "Underweight",
        Some(v) if v < 24.9 => "Normal",
        Some(v) if v < 29.9 => "Overweight",
        Some(_) => "Obese",
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// How far the current weight has moved from the starting weight towards the goal
pub fn weight_goal_progress_percent(initial_weight: f64, current_weight: f64, goal_weight: f64) -> f64 {
    if initial_weight <= goal_weight {
        return 0.0;
    }
    clamp_percent((initial_weight - current_weight) / (initial_weight - goal_weight) * 100.0)
}

/// current / goal as a percentage in [0, 100]; zero goal yields 0
pub fn ratio_progress_percent(current: f64, goal: f64) -> f64 {
    if goal.is_nan() || goal <= 0.0 {
        return 0.0;
    }
    clamp_percent(current / goal * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeeklyTotals {
    pub total_minutes: f64,
    pub sessions_completed: u32,
}

pub fn weekly_activity_totals(week: &[DayActivity; 7]) -> WeeklyTotals {
    WeeklyTotals {
        total_minutes: week.iter().map(|d| d.activity).sum(),
        sessions_completed: week.iter().filter(|d| d.completed_session).count() as u32,
    }
}

/// Logs split around a point in time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartitionedLogs {
    /// At or before `now`, most recent first
    pub past: Vec<WorkoutLogEntry>,
    /// After `now`, soonest first
    pub future: Vec<WorkoutLogEntry>,
}

/// Split logs into done and upcoming by their effective date-time.
/// Same-day logs compare on the clock time, not just the date.
pub fn partition_workout_logs(logs: &[WorkoutLogEntry], now: NaiveDateTime) -> PartitionedLogs {
    let (mut past, mut future): (Vec<WorkoutLogEntry>, Vec<WorkoutLogEntry>) = logs
        .iter()
        .cloned()
        .partition(|log| log.scheduled_at() <= now);

    past.sort_by_key(|log| Reverse(log.scheduled_at()));
    future.sort_by_key(|log| log.scheduled_at());

    PartitionedLogs { past, future }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::default_week;
    use crate::models::workout_log::NewWorkoutLog;
    use chrono::NaiveDate;

    fn n(v: f64) -> Numeric {
        Numeric::Number(v)
    }

    #[test]
    fn test_bmi() {
        assert_eq!(bmi(n(70.0), n(0.0)), Bmi::Unavailable);
        assert_eq!(bmi(n(70.0), n(175.0)), Bmi::Value(22.9));
        assert_eq!(bmi(Numeric::Empty, n(175.0)), Bmi::Unavailable);
        assert_eq!(bmi(n(0.0), n(175.0)), Bmi::Unavailable);
        assert_eq!(bmi(n(70.0), n(-170.0)), Bmi::Unavailable);
        assert_eq!(bmi(n(70.0), n(0.0)).to_string(), "-");
        assert_eq!(bmi(n(70.0), n(175.0)).to_string(), "22.9");
    }

    #[test]
    fn test_bmi_category() {
        assert_eq!(bmi_category(Bmi::Value(22.9)), "Normal");
        assert_eq!(bmi_category(Bmi::Value(30.0)), "Obese");
        assert_eq!(bmi_category(Bmi::Value(18.4)), "Underweight");
        assert_eq!(bmi_category(Bmi::Value(24.9)), "Overweight");
        assert_eq!(bmi_category(Bmi::Value(29.9)), "Obese");
        assert_eq!(bmi_category(Bmi::Unavailable), "");
    }

    #[test]
    fn test_weight_goal_progress() {
        assert_eq!(weight_goal_progress_percent(75.0, 70.0, 65.0), 50.0);
        assert_eq!(weight_goal_progress_percent(65.0, 70.0, 65.0), 0.0);
        assert_eq!(weight_goal_progress_percent(60.0, 58.0, 65.0), 0.0);
        // Overshooting the goal and gaining weight both clamp
        assert_eq!(weight_goal_progress_percent(75.0, 60.0, 65.0), 100.0);
        assert_eq!(weight_goal_progress_percent(75.0, 80.0, 65.0), 0.0);
    }

    #[test]
    fn test_ratio_progress() {
        assert_eq!(ratio_progress_percent(10.0, 8.0), 100.0);
        assert_eq!(ratio_progress_percent(4.0, 0.0), 0.0);
        assert_eq!(ratio_progress_percent(4.0, 8.0), 50.0);
        assert_eq!(ratio_progress_percent(-1.0, 8.0), 0.0);
        assert_eq!(ratio_progress_percent(1.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_weekly_totals() {
        let mut week = default_week();
        week[0].activity = 30.0;
        week[2].activity = 45.5;
        week[2].completed_session = true;
        week[6].completed_session = true;
        assert_eq!(
            weekly_activity_totals(&week),
            WeeklyTotals {
                total_minutes: 75.5,
                sessions_completed: 2
            }
        );
        assert_eq!(weekly_activity_totals(&default_week()), WeeklyTotals::default());
    }

    fn log(id: &str, date: &str, time: Option<&str>) -> WorkoutLogEntry {
        WorkoutLogEntry::new(
            id.to_string(),
            NewWorkoutLog {
                exercise_id: "ex".to_string(),
                exercise_name: "Squat".to_string(),
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                time: time.map(|t| t.to_string()),
                duration: "20 min".to_string(),
                ..Default::default()
            },
        )
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_partition_same_day_uses_clock_time() {
        let logs = vec![
            log("a", "2024-06-10", Some("09:00")),
            log("b", "2024-06-10", Some("11:00")),
            log("c", "2024-06-09", Some("23:00")),
        ];
        let result = partition_workout_logs(&logs, at("2024-06-10", "10:00"));

        let past: Vec<&str> = result.past.iter().map(|l| l.log_id.as_str()).collect();
        let future: Vec<&str> = result.future.iter().map(|l| l.log_id.as_str()).collect();
        assert_eq!(past, vec!["a", "c"]);
        assert_eq!(future, vec!["b"]);
    }

    #[test]
    fn test_partition_ordering_and_boundary() {
        let logs = vec![
            log("later", "2024-06-12", None),
            log("exact", "2024-06-10", Some("10:00")),
            log("sooner", "2024-06-11", Some("07:15")),
            log("old", "2024-06-01", None),
            log("today-no-time", "2024-06-10", None),
        ];
        let result = partition_workout_logs(&logs, at("2024-06-10", "10:00"));

        let past: Vec<&str> = result.past.iter().map(|l| l.log_id.as_str()).collect();
        let future: Vec<&str> = result.future.iter().map(|l| l.log_id.as_str()).collect();
        assert_eq!(past, vec!["exact", "today-no-time", "old"]);
        assert_eq!(future, vec!["sooner", "later"]);
    }

    #[test]
    fn test_partition_empty() {
        let result = partition_workout_logs(&[], at("2024-06-10", "10:00"));
        assert!(result.past.is_empty());
        assert!(result.future.is_empty());
    }
}
