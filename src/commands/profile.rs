// Profile commands
// show, set, reset and photo upload for the logged-in user

use clap::Subcommand;
use std::path::{Path, PathBuf};

use fitbuddy::features::profile_store::ResetMode;
use fitbuddy::models::profile::SECTION_NAMES;
use fitbuddy::models::schema::editable_fields;
use fitbuddy::utils::metrics::{bmi, bmi_category};
use fitbuddy::utils::validators::{photo_data_uri, ValidationError};

use crate::{Data, Error};

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Print the profile, or one section of it
    Show {
        #[arg(long)]
        section: Option<String>,
    },

    /// Edit fields, e.g. `profile.weight=68 appearance.theme=dark`
    Set {
        #[arg(required = true)]
        edits: Vec<String>,
    },

    /// List the editable field paths
    Fields,

    /// Replace the profile with fresh defaults
    Reset {
        /// Clear name and email as well
        #[arg(long)]
        full: bool,
    },

    /// Upload a profile photo from an image file
    Photo { path: PathBuf },
}

pub async fn profile(data: &Data, action: ProfileCommand) -> Result<(), Error> {
    match action {
        ProfileCommand::Show { section } => show(data, section.as_deref()).await,
        ProfileCommand::Set { edits } => set(data, &edits).await,
        ProfileCommand::Fields => {
            for path in editable_fields() {
                println!("{}", path);
            }
            Ok(())
        }
        ProfileCommand::Reset { full } => reset(data, full).await,
        ProfileCommand::Photo { path } => photo(data, &path).await,
    }
}

async fn show(data: &Data, section: Option<&str>) -> Result<(), Error> {
    let session = data.store.require_session()?;
    let profile = data.store.load_profile(&session)?;
    let value = serde_json::to_value(&profile)?;

    match section {
        Some(name) => {
            let Some(part) = value.get(name) else {
                return Err(format!("Unknown section '{}'. Sections: {}", name, SECTION_NAMES.join(", ")).into());
            };
            println!("{}", serde_json::to_string_pretty(part)?);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            let bmi = bmi(profile.profile.weight, profile.profile.height);
            println!("\nBMI: {} {}", bmi, bmi_category(bmi));
        }
    }
    Ok(())
}

async fn set(data: &Data, edits: &[String]) -> Result<(), Error> {
    let session = data.store.require_session()?;
    let pairs = edits
        .iter()
        .map(|edit| {
            edit.split_once('=')
                .map(|(path, value)| (path.trim().to_string(), value.to_string()))
                .ok_or_else(|| format!("Expected field=value, got '{}'", edit))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let commit = data.store.update_profile(&session, &pairs)?;
    for (path, error) in &commit.reverted {
        println!("Not saved: {} ({})", path, error);
    }
    println!(
        "Profile saved ({} of {} changes applied).",
        pairs.len() - commit.reverted.len(),
        pairs.len()
    );
    Ok(())
}

async fn reset(data: &Data, full: bool) -> Result<(), Error> {
    let session = data.store.require_session()?;
    let mode = if full {
        ResetMode::Full
    } else {
        ResetMode::KeepIdentity
    };
    data.store.reset_profile(&session, mode)?;
    println!("Profile reset to defaults.");
    Ok(())
}

async fn photo(data: &Data, path: &Path) -> Result<(), Error> {
    let session = data.store.require_session()?;
    let mime = image_mime(path).ok_or(ValidationError::InvalidPhoto)?;
    let bytes = tokio::fs::read(path).await?;
    let uri = photo_data_uri(&bytes, mime)?;

    data.store.update_profile(&session, &[("profile.photo", uri.as_str())])?;
    println!("Profile photo updated ({} KB).", bytes.len() / 1024);
    Ok(())
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
