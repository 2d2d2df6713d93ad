// Workout log commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use tracing::warn;

use fitbuddy::models::workout_log::{NewWorkoutLog, WorkoutLogEntry};
use fitbuddy::utils::formatters::{capitalize, format_relative_day, truncate};

use crate::{Data, Error};

#[derive(Subcommand)]
pub enum WorkoutsCommand {
    /// Log a completed or planned workout
    Log {
        /// Exercise id from `fitbuddy exercises list`
        exercise_id: String,
        /// Exercise name; looked up when omitted
        #[arg(long)]
        name: Option<String>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// HH:mm
        #[arg(long)]
        time: Option<String>,
        #[arg(long, default_value = "")]
        duration: String,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        reps: Option<u32>,
        /// kg
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List logged workouts
    List {
        /// Only show upcoming workouts
        #[arg(long, conflicts_with = "past")]
        upcoming: bool,
        /// Only show past workouts
        #[arg(long)]
        past: bool,
    },
}

pub async fn workouts(data: &Data, action: WorkoutsCommand) -> Result<(), Error> {
    let session = data.store.require_session()?;
    let now = Local::now().naive_local();

    match action {
        WorkoutsCommand::Log {
            exercise_id,
            name,
            date,
            time,
            duration,
            sets,
            reps,
            weight,
            notes,
        } => {
            let exercise_name = match name {
                Some(name) => name,
                None => match data.exercises.get_exercise(&exercise_id).await {
                    Ok(exercise) => capitalize(&exercise.name),
                    Err(e) => {
                        warn!("Could not look up exercise {}: {}", exercise_id, e);
                        exercise_id.clone()
                    }
                },
            };

            let entry = data.store.log_workout(
                &session,
                NewWorkoutLog {
                    exercise_id,
                    exercise_name,
                    date: date.unwrap_or(now.date()),
                    time,
                    duration,
                    sets,
                    reps,
                    weight,
                    notes,
                },
                now,
            )?;
            println!(
                "Logged {} for {}.",
                entry.exercise_name,
                format_relative_day(entry.scheduled_at(), now)
            );
        }
        WorkoutsCommand::List { upcoming, past } => {
            let split = data.store.partitioned_workouts(&session, now)?;
            if !past {
                print_section("Upcoming", &split.future, now);
            }
            if !upcoming {
                print_section("Past", &split.past, now);
            }
        }
    }
    Ok(())
}

fn print_section(title: &str, logs: &[WorkoutLogEntry], now: chrono::NaiveDateTime) {
    println!("{} ({}):", title, logs.len());
    for log in logs {
        let mut details = Vec::new();
        if !log.duration.is_empty() {
            details.push(log.duration.clone());
        }
        match (log.sets, log.reps) {
            (Some(sets), Some(reps)) => details.push(format!("{}x{}", sets, reps)),
            (Some(sets), None) => details.push(format!("{} sets", sets)),
            (None, Some(reps)) => details.push(format!("{} reps", reps)),
            (None, None) => {}
        }
        if let Some(weight) = log.weight {
            details.push(format!("{} kg", weight));
        }
        if let Some(notes) = log.notes.as_deref().filter(|n| !n.is_empty()) {
            details.push(truncate(notes, 40));
        }
        println!(
            "  {} - {} [{}] {}",
            format_relative_day(log.scheduled_at(), now),
            log.exercise_name,
            log.log_id,
            details.join(", ")
        );
    }
}
