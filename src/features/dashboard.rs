// Dashboard summary
// Everything the dashboard shows, derived from one profile and its workout logs

use chrono::NaiveDateTime;

use crate::models::profile::UserProfile;
use crate::models::workout_log::WorkoutLogEntry;
use crate::utils::config::DASHBOARD_LIST_LIMIT;
use crate::utils::metrics::{
    bmi, bmi_category, partition_workout_logs, ratio_progress_percent,
    weekly_activity_totals, weight_goal_progress_percent, Bmi, WeeklyTotals,
};
use crate::utils::streak::{calculate_streak, StreakResult};

/// A current value against its goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub current: f64,
    pub goal: f64,
    /// 0..=100
    pub percent: f64,
}

impl GoalProgress {
    pub fn new(current: f64, goal: f64) -> Self {
        Self {
            current,
            goal,
            percent: ratio_progress_percent(current, goal),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub bmi: Bmi,
    pub bmi_category: &'static str,
    /// Only known when the starting, current and goal weights are all set
    pub weight_goal_percent: Option<f64>,
    pub water: GoalProgress,
    pub sleep: GoalProgress,
    pub weekly_minutes: GoalProgress,
    pub weekly_sessions: GoalProgress,
    pub week: WeeklyTotals,
    pub streak: StreakResult,
    /// Soonest first
    pub upcoming: Vec<WorkoutLogEntry>,
    /// Most recent first
    pub recent: Vec<WorkoutLogEntry>,
}

impl DashboardSummary {
    pub fn build(
        profile: &UserProfile,
        logs: &[WorkoutLogEntry],
        now: NaiveDateTime,
        initial_weight: Option<f64>,
    ) -> Self {
        let body = &profile.profile;
        let dashboard = &profile.dashboard;

        let bmi = bmi(body.weight, body.height);
        let weight_goal_percent = match (initial_weight, body.weight.as_f64(), body.goal_weight.as_f64()) {
            (Some(initial), Some(current), Some(goal)) => {
                Some(weight_goal_progress_percent(initial, current, goal))
            }
            _ => None,
        };

        let week = weekly_activity_totals(&dashboard.weekly_activity_data);
        let mut logs = partition_workout_logs(logs, now);
        let dates: Vec<_> = logs.past.iter().map(|l| l.date).collect();
        logs.past.truncate(DASHBOARD_LIST_LIMIT);
        logs.future.truncate(DASHBOARD_LIST_LIMIT);

        Self {
            bmi,
            bmi_category: bmi_category(bmi),
            weight_goal_percent,
            water: GoalProgress::new(dashboard.current_water_intake, dashboard.daily_water_goal),
            sleep: GoalProgress::new(dashboard.current_sleep_hours, dashboard.daily_sleep_hours_goal),
            weekly_minutes: GoalProgress::new(week.total_minutes, dashboard.weekly_activity_minutes_goal),
            weekly_sessions: GoalProgress::new(
                f64::from(week.sessions_completed),
                f64::from(dashboard.weekly_session_goal.count),
            ),
            week,
            streak: calculate_streak(&dates, now.date()),
            upcoming: logs.future,
            recent: logs.past,
        }
    }
}
