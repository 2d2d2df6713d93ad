// Dashboard commands
// Summary view plus the quick trackers: water, sleep, weekly activity and body-part goals

use chrono::{Local, Weekday};
use clap::Subcommand;

use fitbuddy::features::dashboard::{DashboardSummary, GoalProgress};
use fitbuddy::models::workout_log::WorkoutLogEntry;
use fitbuddy::utils::formatters::{capitalize, format_duration, format_percent, format_relative_day};

use crate::{Data, Error};

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// Show the dashboard
    Show {
        /// Starting weight in kg, for goal progress
        #[arg(long)]
        initial_weight: Option<f64>,
    },

    /// Add cups of water (negative to undo)
    Water {
        #[arg(allow_hyphen_values = true)]
        cups: f64,
    },

    /// Set last night's sleep in hours
    Sleep { hours: f64 },

    /// Record one day of this week's activity
    Day {
        /// Mon..Sun
        day: Weekday,
        minutes: f64,
        #[arg(long)]
        completed: bool,
    },

    /// Clear this week's activity chart
    ResetWeek,

    /// Set or remove a weekly body-part goal
    BodyGoal {
        body_part: String,
        /// Sessions per week
        count: Option<u32>,
        #[arg(long, conflicts_with = "count")]
        remove: bool,
    },
}

pub async fn dashboard(data: &Data, action: DashboardCommand) -> Result<(), Error> {
    let session = data.store.require_session()?;

    match action {
        DashboardCommand::Show { initial_weight } => {
            let profile = data.store.load_profile(&session)?;
            let logs = data.store.workout_logs(&session)?;
            let now = Local::now().naive_local();
            let summary = DashboardSummary::build(&profile, &logs, now, initial_weight);
            print_summary(&session.name, &summary, now);
        }
        DashboardCommand::Water { cups } => {
            let profile = data.store.modify_profile(&session, |p| p.dashboard.log_water(cups))?;
            let d = &profile.dashboard;
            println!("Water: {} / {} cups", d.current_water_intake, d.daily_water_goal);
        }
        DashboardCommand::Sleep { hours } => {
            let profile = data.store.modify_profile(&session, |p| p.dashboard.set_sleep_hours(hours))?;
            let d = &profile.dashboard;
            println!("Sleep: {} / {} hours", d.current_sleep_hours, d.daily_sleep_hours_goal);
        }
        DashboardCommand::Day {
            day,
            minutes,
            completed,
        } => {
            data.store
                .modify_profile(&session, |p| p.dashboard.record_day(day, minutes, completed))?;
            println!("Recorded {} minutes on {}.", minutes, day);
        }
        DashboardCommand::ResetWeek => {
            data.store.modify_profile(&session, |p| p.dashboard.reset_week())?;
            println!("Weekly activity cleared.");
        }
        DashboardCommand::BodyGoal {
            body_part,
            count,
            remove,
        } => {
            if remove {
                let mut removed = false;
                data.store.modify_profile(&session, |p| {
                    removed = p.dashboard.remove_body_part_goal(&body_part);
                })?;
                if removed {
                    println!("Removed goal for {}.", body_part);
                } else {
                    println!("No goal set for {}.", body_part);
                }
            } else {
                let count = count.ok_or("Give a weekly count, or --remove")?;
                data.store
                    .modify_profile(&session, |p| p.dashboard.add_body_part_goal(&body_part, count))?;
                println!("Goal set: {} x {} per week.", capitalize(body_part.trim()), count);
            }
        }
    }
    Ok(())
}

fn progress_line(label: &str, progress: GoalProgress, unit: &str) -> String {
    format!(
        "{:<16} {} / {} {} ({})",
        label,
        progress.current,
        progress.goal,
        unit,
        format_percent(progress.percent)
    )
}

fn workout_line(log: &WorkoutLogEntry, now: chrono::NaiveDateTime) -> String {
    format!(
        "  {} - {}{}",
        format_relative_day(log.scheduled_at(), now),
        log.exercise_name,
        if log.duration.is_empty() {
            String::new()
        } else {
            format!(" ({})", log.duration)
        }
    )
}

fn print_summary(name: &str, summary: &DashboardSummary, now: chrono::NaiveDateTime) {
    println!("Hello, {}!", name);
    println!();

    match summary.bmi.value() {
        Some(_) => println!("{:<16} {} ({})", "BMI", summary.bmi, summary.bmi_category),
        None => println!("{:<16} {}", "BMI", summary.bmi),
    }
    if let Some(percent) = summary.weight_goal_percent {
        println!("{:<16} {} to goal", "Weight", format_percent(percent));
    }
    println!("{}", progress_line("Water", summary.water, "cups"));
    println!("{}", progress_line("Sleep", summary.sleep, "hours"));
    println!(
        "{:<16} {} of {} ({})",
        "Active this week",
        format_duration(summary.weekly_minutes.current.round() as i64),
        format_duration(summary.weekly_minutes.goal.round() as i64),
        format_percent(summary.weekly_minutes.percent)
    );
    println!("{}", progress_line("Sessions", summary.weekly_sessions, "this week"));
    println!(
        "{:<16} {} days (best {})",
        "Streak", summary.streak.current, summary.streak.longest
    );

    println!("\nUpcoming workouts:");
    if summary.upcoming.is_empty() {
        println!("  Nothing scheduled.");
    }
    for log in &summary.upcoming {
        println!("{}", workout_line(log, now));
    }

    println!("\nRecent workouts:");
    if summary.recent.is_empty() {
        println!("  No workouts logged yet.");
    }
    for log in &summary.recent {
        println!("{}", workout_line(log, now));
    }
}
