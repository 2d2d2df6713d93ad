// Exercise browser commands

use clap::Subcommand;
use tracing::{debug, info};

use fitbuddy::models::exercise::{facet_values, filter_exercises, Exercise, ExerciseFilter, Facet};
use fitbuddy::utils::config::EXERCISE_DISPLAY_LIMIT;
use fitbuddy::utils::formatters::capitalize;

use crate::{Data, Error};

#[derive(Subcommand)]
pub enum ExercisesCommand {
    /// Search and filter exercises
    List {
        /// Matches exercise names and target muscles
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        body_part: String,
        #[arg(long, default_value = "")]
        equipment: String,
        /// Number of API pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Print the available body parts and equipment instead
        #[arg(long)]
        facets: bool,
    },

    /// Show one exercise in detail
    Show { id: String },
}

pub async fn exercises(data: &Data, action: ExercisesCommand) -> Result<(), Error> {
    match action {
        ExercisesCommand::List {
            search,
            body_part,
            equipment,
            pages,
            facets,
        } => {
            let all = load_pages(data, pages.max(1)).await?;

            if facets {
                println!("Body parts: {}", facet_values(&all, Facet::BodyPart).join(", "));
                println!("Equipment: {}", facet_values(&all, Facet::Equipment).join(", "));
                return Ok(());
            }

            let filter = ExerciseFilter {
                search,
                body_part,
                equipment,
                limit: EXERCISE_DISPLAY_LIMIT,
            };
            let found = filter_exercises(&all, &filter);
            if found.is_empty() {
                println!("No exercises match your filters.");
            }
            for exercise in found {
                println!(
                    "{:<10} {:<40} {}",
                    exercise.exercise_id,
                    capitalize(&exercise.name),
                    exercise.body_parts.iter().map(|b| capitalize(b)).collect::<Vec<_>>().join(", ")
                );
            }
        }
        ExercisesCommand::Show { id } => {
            let exercise = data.exercises.get_exercise(&id).await?;
            print_exercise(&exercise);
        }
    }
    Ok(())
}

/// Fetch up to `pages` pages, following `nextPage` links
async fn load_pages(data: &Data, pages: usize) -> Result<Vec<Exercise>, Error> {
    let mut page = data.exercises.list_exercises(data.config.page_size).await?;
    let mut all = std::mem::take(&mut page.exercises);

    for _ in 1..pages {
        let Some(next) = page.next_page.take() else {
            break;
        };
        debug!("Following {}", next);
        page = data.exercises.next_page(&next).await?;
        all.append(&mut page.exercises);
    }

    info!("Loaded {} exercises", all.len());
    Ok(all)
}

fn print_exercise(exercise: &Exercise) {
    let list = |values: &[String]| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.iter().map(|v| capitalize(v)).collect::<Vec<_>>().join(", ")
        }
    };

    println!("{}", capitalize(&exercise.name));
    println!("  Target:     {}", list(&exercise.target_muscles));
    println!("  Secondary:  {}", list(&exercise.secondary_muscles));
    println!("  Body parts: {}", list(&exercise.body_parts));
    println!("  Equipment:  {}", list(&exercise.equipments));
    if let Some(gif) = &exercise.gif_url {
        println!("  Demo:       {}", gif);
    }
    if !exercise.instructions.is_empty() {
        println!("\nInstructions:");
        for (i, step) in exercise.instructions.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
}
