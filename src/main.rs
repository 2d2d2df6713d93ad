// FitBuddy - Rust Edition
// Command-line front end for the FitBuddy profile store

mod commands;

use std::env;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitbuddy::api::exercisedb::ExerciseDbClient;
use fitbuddy::api::storage::FileStore;
use fitbuddy::features::profile_store::ProfileStore;
use fitbuddy::utils::config::AppConfig;

use commands::dashboard::DashboardCommand;
use commands::exercises::ExercisesCommand;
use commands::profile::ProfileCommand;
use commands::workouts::WorkoutsCommand;

/// State shared across all commands
pub struct Data {
    pub config: AppConfig,
    pub store: ProfileStore<FileStore>,
    pub exercises: ExerciseDbClient,
}

type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "fitbuddy", about = "FitBuddy fitness tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override
    #[arg(long, global = true)]
    data_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in and open a session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Close the current session
    Logout,

    /// Start a password reset
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Finish a password reset
    ResetPassword {
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// View and edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Daily and weekly tracking
    Dashboard {
        #[command(subcommand)]
        action: DashboardCommand,
    },

    /// Log and list workouts
    Workouts {
        #[command(subcommand)]
        action: WorkoutsCommand,
    },

    /// Browse the exercise database
    Exercises {
        #[command(subcommand)]
        action: ExercisesCommand,
    },
}

async fn run(data: &Data, command: Command) -> Result<(), Error> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => commands::account::register(data, &name, &email, &password).await,
        Command::Login { email, password } => commands::account::login(data, &email, &password).await,
        Command::Logout => commands::account::logout(data).await,
        Command::ForgotPassword { email } => commands::account::forgot_password(data, &email).await,
        Command::ResetPassword { password, confirm } => {
            commands::account::reset_password(data, &password, &confirm).await
        }
        Command::Profile { action } => commands::profile::profile(data, action).await,
        Command::Dashboard { action } => commands::dashboard::dashboard(data, action).await,
        Command::Workouts { action } => commands::workouts::workouts(data, action).await,
        Command::Exercises { action } => commands::exercises::exercises(data, action).await,
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "fitbuddy=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Build HTTP client for API calls
    let http_client = match reqwest::Client::builder().user_agent("FitBuddy/1.0").build() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let data = Data {
        store: ProfileStore::new(FileStore::new(config.data_dir.clone())),
        exercises: ExerciseDbClient::new(http_client, config.exercise_api_url.clone()),
        config,
    };
    debug!("Using data directory {}", data.store.storage().dir().display());

    if let Err(e) = run(&data, cli.command).await {
        error!("Command error: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
