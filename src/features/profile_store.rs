// Profile store
// Accounts, sessions, profiles and workout logs on top of a key-value store

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::storage::KeyValueStore;
use crate::features::profile_editor::{ProfileCommit, ProfileEditor};
use crate::features::reconcile::reconcile_json;
use crate::models::account::{RegisteredUser, Session};
use crate::models::profile::{get_default_profile, UserProfile};
use crate::models::workout_log::{generate_log_id, NewWorkoutLog, WorkoutLogEntry};
use crate::utils::config::{
    profile_key, workouts_key, CURRENT_USER_KEY, RESET_EMAIL_KEY, USERS_KEY,
};
use crate::utils::metrics::{partition_workout_logs, PartitionedLogs};
use crate::utils::streak::calculate_streak;
use crate::utils::validators::{
    validate_email, validate_password, validate_registration, validate_time, ValidationError,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Reset session expired or invalid")]
    ResetSessionExpired,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// What `reset_profile` keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Fresh defaults, keeping name and email
    KeepIdentity,
    /// Fresh defaults with identity cleared too
    Full,
}

pub struct ProfileStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Accounts

    /// Create an account and its default profile. Nothing is written on rejection.
    pub fn register(&self, name: &str, email: &str, password: &str) -> StoreResult<Session> {
        validate_registration(name, email, password)?;
        let (name, email) = (name.trim(), email.trim());

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::EmailAlreadyRegistered);
        }

        let user = RegisteredUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        users.push(user.clone());
        self.write_json(USERS_KEY, &users)?;
        self.write_json(&profile_key(email), &get_default_profile(name, email))?;

        info!("Registered {}", email);
        Ok(user.session())
    }

    /// Check credentials, open a session and bring the stored profile up to date
    pub fn login(&self, email: &str, password: &str) -> StoreResult<(Session, UserProfile)> {
        let email = email.trim();
        let user = self
            .users()?
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(StoreError::InvalidCredentials)?;

        let session = user.session();
        self.write_json(CURRENT_USER_KEY, &session)?;

        let profile = self.load_profile(&session)?;
        self.save_profile(&session, &profile)?;

        info!("Logged in {}", email);
        Ok((session, profile))
    }

    pub fn logout(&self) -> StoreResult<()> {
        if let Some(session) = self.current_session()? {
            info!("Logged out {}", session.email);
        }
        self.storage.remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    /// The persisted session, if any; an unreadable one counts as logged out
    pub fn current_session(&self) -> StoreResult<Option<Session>> {
        Ok(self.read_json(CURRENT_USER_KEY)?)
    }

    pub fn require_session(&self) -> StoreResult<Session> {
        self.current_session()?.ok_or(StoreError::NotLoggedIn)
    }

    /// Remember which account is resetting its password
    pub fn request_password_reset(&self, email: &str) -> StoreResult<()> {
        let email = email.trim();
        if !validate_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()).into());
        }
        self.write_json(RESET_EMAIL_KEY, &email)?;
        info!("Password reset requested for {}", email);
        Ok(())
    }

    /// Finish a pending password reset
    pub fn reset_password(&self, password: &str, confirm: &str) -> StoreResult<()> {
        if password != confirm {
            return Err(ValidationError::PasswordMismatch.into());
        }
        validate_password(password)?;

        let email: String = self
            .read_json(RESET_EMAIL_KEY)?
            .ok_or(StoreError::ResetSessionExpired)?;

        let mut users = self.users()?;
        let Some(user) = users.iter_mut().find(|u| u.email == email) else {
            self.storage.remove(RESET_EMAIL_KEY)?;
            return Err(StoreError::ResetSessionExpired);
        };
        user.password = password.to_string();

        self.write_json(USERS_KEY, &users)?;
        self.storage.remove(RESET_EMAIL_KEY)?;
        info!("Password reset for {}", email);
        Ok(())
    }

    // Profiles

    /// Load and reconcile; a missing or unreadable record yields defaults.
    ///
    /// Unreadable text is copied to `{key}.corrupt` first, so a later save
    /// does not destroy it.
    pub fn load_profile(&self, session: &Session) -> StoreResult<UserProfile> {
        let key = profile_key(&session.email);
        let defaults = get_default_profile(&session.name, &session.email);
        let raw = self.storage.load(&key)?;
        let reconciled = reconcile_json(raw.as_deref(), &defaults);
        if let (Some(reason), Some(raw)) = (reconciled.recovered_from, raw.as_deref()) {
            warn!("Profile for {} was unreadable ({}), using defaults", session.email, reason);
            self.storage.save(&corrupt_key(&key), raw)?;
        }
        Ok(reconciled.profile)
    }

    /// Replace the whole stored record
    pub fn save_profile(&self, session: &Session, profile: &UserProfile) -> StoreResult<()> {
        self.write_json(&profile_key(&session.email), profile)
    }

    /// Load, change and save in one step
    pub fn modify_profile<F>(&self, session: &Session, change: F) -> StoreResult<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.load_profile(session)?;
        change(&mut profile);
        self.save_profile(session, &profile)?;
        Ok(profile)
    }

    /// Apply `path = raw` edits through the editor, then save.
    ///
    /// Unknown paths and a blocked email abort without saving; other invalid
    /// fields are reverted and reported in the commit.
    pub fn update_profile<P, V>(&self, session: &Session, edits: &[(P, V)]) -> StoreResult<ProfileCommit>
    where
        P: AsRef<str>,
        V: AsRef<str>,
    {
        let mut editor = ProfileEditor::new(self.load_profile(session)?);
        for (path, raw) in edits {
            match editor.set(path.as_ref(), raw.as_ref()) {
                Err(e @ ValidationError::UnknownField(_)) => return Err(e.into()),
                Err(e) => debug!("Edit of {} flagged: {}", path.as_ref(), e),
                Ok(()) => {}
            }
        }

        let commit = editor.commit()?;
        self.save_profile(session, &commit.profile)?;
        info!(
            "Updated profile for {} ({} edits, {} reverted)",
            session.email,
            edits.len(),
            commit.reverted.len()
        );
        Ok(commit)
    }

    pub fn reset_profile(&self, session: &Session, mode: ResetMode) -> StoreResult<UserProfile> {
        let profile = match mode {
            ResetMode::KeepIdentity => get_default_profile(&session.name, &session.email),
            ResetMode::Full => get_default_profile("", ""),
        };
        self.save_profile(session, &profile)?;
        info!("Reset profile for {} ({:?})", session.email, mode);
        Ok(profile)
    }

    // Workout logs

    /// Stored logs in insertion order; unreadable entries are skipped
    pub fn workout_logs(&self, session: &Session) -> StoreResult<Vec<WorkoutLogEntry>> {
        let entries: Vec<Value> = self.read_json(&workouts_key(&session.email))?.unwrap_or_default();
        Ok(readable_logs(&entries, &session.email))
    }

    pub fn partitioned_workouts(&self, session: &Session, now: NaiveDateTime) -> StoreResult<PartitionedLogs> {
        Ok(partition_workout_logs(&self.workout_logs(session)?, now))
    }

    /// Append a log and refresh the workout counters derived from past logs
    pub fn log_workout(
        &self,
        session: &Session,
        log: NewWorkoutLog,
        now: NaiveDateTime,
    ) -> StoreResult<WorkoutLogEntry> {
        if let Some(time) = &log.time {
            validate_time(time)?;
        }

        let key = workouts_key(&session.email);
        let entry = WorkoutLogEntry::new(generate_log_id(now), log);

        // Raw values, so entries this version can't read are written back untouched
        let mut entries: Vec<Value> = self.read_json_strict(&key)?.unwrap_or_default();
        entries.push(serde_json::to_value(&entry).context("Failed to encode workout log")?);
        self.write_json(&key, &entries)?;

        let logs = readable_logs(&entries, &session.email);

        let past = partition_workout_logs(&logs, now).past;
        let dates: Vec<_> = past.iter().map(|l| l.date).collect();
        let streak = calculate_streak(&dates, now.date());
        self.modify_profile(session, |profile| {
            profile.progress.total_workouts = past.len() as u32;
            profile.progress.streak = streak.current;
        })?;

        info!(
            "Logged {} on {} for {}",
            entry.exercise_name, entry.date, session.email
        );
        Ok(entry)
    }

    // Helpers

    /// Every caller may write the list back, so unreadable text is an error
    fn users(&self) -> StoreResult<Vec<RegisteredUser>> {
        Ok(self.read_json_strict(USERS_KEY)?.unwrap_or_default())
    }

    /// Missing key or unparseable text both read as `None`
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.storage.load(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable {}: {}", key, e);
                Ok(None)
            }
        }
    }

    /// Missing key reads as `None`; unparseable text is a storage error
    fn read_json_strict<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.storage.load(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("Stored {} is unreadable, refusing to overwrite it", key))?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string(value).with_context(|| format!("Failed to encode {}", key))?;
        self.storage.save(key, &text)?;
        Ok(())
    }
}

fn corrupt_key(key: &str) -> String {
    format!("{}.corrupt", key)
}

fn readable_logs(entries: &[Value], email: &str) -> Vec<WorkoutLogEntry> {
    entries
        .iter()
        .filter_map(|entry| match WorkoutLogEntry::deserialize(entry) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("Skipping unreadable workout log for {}: {}", email, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::storage::{FileStore, MemoryStore};
    use crate::models::numeric::Numeric;
    use chrono::NaiveDate;
    use serde_json::json;

    fn store() -> ProfileStore<MemoryStore> {
        ProfileStore::new(MemoryStore::new())
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").unwrap()
    }

    fn stored(store: &ProfileStore<MemoryStore>, key: &str) -> Value {
        serde_json::from_str(&store.storage().load(key).unwrap().unwrap()).unwrap()
    }

    fn workout(date: &str, time: Option<&str>) -> NewWorkoutLog {
        NewWorkoutLog {
            exercise_id: "ex1".to_string(),
            exercise_name: "Push-up".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: time.map(str::to_string),
            duration: "30 min".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_login_edit_relogin() {
        let store = store();
        store.register("Jane", "jane@x.com", "secret1").unwrap();

        let saved = stored(&store, "userData_jane@x.com");
        assert_eq!(saved["profile"]["name"], json!("Jane"));
        assert_eq!(saved["dashboard"]["weeklyActivityData"].as_array().unwrap().len(), 7);

        let (session, profile) = store.login("jane@x.com", "secret1").unwrap();
        assert_eq!(profile.profile.email, "jane@x.com");
        assert_eq!(store.current_session().unwrap(), Some(session.clone()));

        let commit = store
            .update_profile(&session, &[("profile.weight", "68")])
            .unwrap();
        assert!(commit.reverted.is_empty());
        assert_eq!(stored(&store, "userData_jane@x.com")["profile"]["weight"], json!(68));

        store.logout().unwrap();
        assert_eq!(store.current_session().unwrap(), None);

        let (_, profile) = store.login("jane@x.com", "secret1").unwrap();
        assert_eq!(profile.profile.weight, Numeric::Number(68.0));
    }

    #[test]
    fn test_duplicate_registration_leaves_store_unchanged() {
        let store = store();
        store.register("Jane", "jane@x.com", "secret1").unwrap();
        let users_before = stored(&store, "fitbuddy-users");

        let err = store.register("Janet", "jane@x.com", "other12").unwrap_err();
        assert!(matches!(err, StoreError::EmailAlreadyRegistered));
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(stored(&store, "fitbuddy-users"), users_before);
        assert_eq!(stored(&store, "userData_jane@x.com")["profile"]["name"], json!("Jane"));
    }

    #[test]
    fn test_registration_validation() {
        let store = store();
        assert!(matches!(
            store.register("Jane", "jane@x.com", "123"),
            Err(StoreError::Validation(ValidationError::PasswordTooShort))
        ));
        assert!(matches!(
            store.register("", "jane@x.com", "secret1"),
            Err(StoreError::Validation(ValidationError::MissingFields))
        ));
        assert_eq!(store.storage().load("fitbuddy-users").unwrap(), None);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let store = store();
        store.register("Jane", "jane@x.com", "secret1").unwrap();
        let err = store.login("jane@x.com", "wrong!!").unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(matches!(store.login("bob@x.com", "secret1"), Err(StoreError::InvalidCredentials)));
        assert!(matches!(store.require_session(), Err(StoreError::NotLoggedIn)));
    }

    #[test]
    fn test_login_upgrades_legacy_profile() {
        let store = store();
        store.register("Jane", "jane@x.com", "secret1").unwrap();
        store
            .storage()
            .save(
                "userData_jane@x.com",
                r#"{"profile": {"name": "Jane", "weight": "70"}, "dashboard": {"weeklyActivityData": [1, 2]}}"#,
            )
            .unwrap();

        let (_, profile) = store.login("jane@x.com", "secret1").unwrap();
        assert_eq!(profile.profile.weight, Numeric::Number(70.0));
        assert_eq!(profile.profile.email, "jane@x.com");

        let saved = stored(&store, "userData_jane@x.com");
        assert_eq!(saved["profile"]["weight"], json!(70));
        assert_eq!(saved["dashboard"]["weeklyActivityData"].as_array().unwrap().len(), 7);
        assert_eq!(saved["appearance"]["theme"], json!("light"));
    }

    #[test]
    fn test_corrupt_profile_falls_back_to_defaults() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        store.storage().save("userData_jane@x.com", "{oops").unwrap();
        let profile = store.load_profile(&session).unwrap();
        assert_eq!(profile, get_default_profile("Jane", "jane@x.com"));

        // The next write replaces the record, but the old text survives
        store.modify_profile(&session, |p| p.dashboard.log_water(1.0)).unwrap();
        assert_eq!(
            store.storage().load("userData_jane@x.com.corrupt").unwrap().as_deref(),
            Some("{oops")
        );
        assert_eq!(stored(&store, "userData_jane@x.com")["dashboard"]["currentWaterIntake"], json!(1));
    }

    #[test]
    fn test_update_profile_blocks_on_email() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        let err = store
            .update_profile(&session, &[("profile.name", "Janet"), ("profile.email", "nope")])
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::InvalidEmail(_))));
        assert_eq!(stored(&store, "userData_jane@x.com")["profile"]["name"], json!("Jane"));

        assert!(matches!(
            store.update_profile(&session, &[("profile.shoeSize", "41")]),
            Err(StoreError::Validation(ValidationError::UnknownField(_)))
        ));
    }

    #[test]
    fn test_update_profile_reverts_invalid_numbers() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        let commit = store
            .update_profile(
                &session,
                &[("profile.name", "Janet"), ("dashboard.dailyWaterGoal", "-2")],
            )
            .unwrap();
        assert_eq!(commit.profile.profile.name, "Janet");
        assert_eq!(commit.profile.dashboard.daily_water_goal, 8.0);
        assert_eq!(commit.reverted.len(), 1);
    }

    #[test]
    fn test_reset_profile() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        store
            .update_profile(&session, &[("profile.weight", "68"), ("appearance.theme", "dark")])
            .unwrap();

        let profile = store.reset_profile(&session, ResetMode::KeepIdentity).unwrap();
        assert_eq!(profile, get_default_profile("Jane", "jane@x.com"));

        let profile = store.reset_profile(&session, ResetMode::Full).unwrap();
        assert_eq!(profile.profile.name, "");
        assert_eq!(profile.profile.email, "");
        assert_eq!(store.load_profile(&session).unwrap().profile.email, "");
    }

    #[test]
    fn test_password_reset_flow() {
        let store = store();
        store.register("Jane", "jane@x.com", "secret1").unwrap();

        assert!(matches!(
            store.reset_password("newpass1", "newpass1"),
            Err(StoreError::ResetSessionExpired)
        ));
        assert!(store.request_password_reset("not-an-email").is_err());

        store.request_password_reset("jane@x.com").unwrap();
        assert!(matches!(
            store.reset_password("newpass1", "newpass2"),
            Err(StoreError::Validation(ValidationError::PasswordMismatch))
        ));
        store.reset_password("newpass1", "newpass1").unwrap();
        assert_eq!(store.storage().load("reset-email").unwrap(), None);

        assert!(store.login("jane@x.com", "secret1").is_err());
        assert!(store.login("jane@x.com", "newpass1").is_ok());
    }

    #[test]
    fn test_log_workout_updates_progress() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        let now = at("2024-06-10", "12:00");

        let first = store.log_workout(&session, workout("2024-06-09", Some("18:00")), now).unwrap();
        let second = store.log_workout(&session, workout("2024-06-10", Some("09:00")), now).unwrap();
        store.log_workout(&session, workout("2024-06-10", Some("18:00")), now).unwrap();
        assert_ne!(first.log_id, second.log_id);

        let profile = store.load_profile(&session).unwrap();
        assert_eq!(profile.progress.total_workouts, 2);
        assert_eq!(profile.progress.streak, 2);

        let logs = store.workout_logs(&session).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].log_id, first.log_id);

        let split = store.partitioned_workouts(&session, now).unwrap();
        assert_eq!(split.past.len(), 2);
        assert_eq!(split.past[0].log_id, second.log_id);
        assert_eq!(split.future.len(), 1);
    }

    #[test]
    fn test_log_workout_rejects_bad_time() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        let err = store
            .log_workout(&session, workout("2024-06-10", Some("25:99")), at("2024-06-10", "12:00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::InvalidTime(_))));
        assert!(store.workout_logs(&session).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_log_entries_are_skipped() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        store
            .storage()
            .save(
                "loggedWorkouts_jane@x.com",
                r#"[{"logId": "a", "exerciseId": "e", "exerciseName": "Squat", "date": "2024-06-01"}, {"bad": true}]"#,
            )
            .unwrap();
        let logs = store.workout_logs(&session).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].exercise_name, "Squat");
    }

    #[test]
    fn test_log_workout_keeps_unreadable_entries() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        store
            .storage()
            .save(
                "loggedWorkouts_jane@x.com",
                r#"[{"logId": "a", "exerciseId": "e", "exerciseName": "Squat", "date": "2024-06-01"}, {"bad": true}]"#,
            )
            .unwrap();

        store
            .log_workout(&session, workout("2024-06-10", Some("09:00")), at("2024-06-10", "12:00"))
            .unwrap();

        let saved = stored(&store, "loggedWorkouts_jane@x.com");
        let saved = saved.as_array().unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0]["exerciseName"], json!("Squat"));
        assert_eq!(saved[1], json!({"bad": true}));
        assert_eq!(saved[2]["exerciseName"], json!("Push-up"));
        assert_eq!(store.load_profile(&session).unwrap().progress.total_workouts, 2);
    }

    #[test]
    fn test_log_workout_refuses_to_overwrite_truncated_logs() {
        let store = store();
        let session = store.register("Jane", "jane@x.com", "secret1").unwrap();
        let truncated = r#"[{"logId": "a", "exerciseId": "e", "exerciseName": "Squat", "date": "2024-06-01"}, {"logId": "b""#;
        store.storage().save("loggedWorkouts_jane@x.com", truncated).unwrap();

        let err = store
            .log_workout(&session, workout("2024-06-10", Some("09:00")), at("2024-06-10", "12:00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(
            store.storage().load("loggedWorkouts_jane@x.com").unwrap().as_deref(),
            Some(truncated)
        );
        assert_eq!(store.load_profile(&session).unwrap().progress.total_workouts, 0);

        // Reading still degrades to an empty list
        assert!(store.workout_logs(&session).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_users_list_is_never_overwritten() {
        let store = store();
        store.register("Jane", "jane@x.com", "secret1").unwrap();
        let full = store.storage().load("fitbuddy-users").unwrap().unwrap();
        let truncated = &full[..full.len() - 1];
        store.storage().save("fitbuddy-users", truncated).unwrap();

        assert!(matches!(
            store.register("Bob", "bob@x.com", "secret1"),
            Err(StoreError::Storage(_))
        ));
        assert_eq!(store.storage().load("userData_bob@x.com").unwrap(), None);

        store.request_password_reset("jane@x.com").unwrap();
        assert!(matches!(
            store.reset_password("newpass1", "newpass1"),
            Err(StoreError::Storage(_))
        ));
        assert!(matches!(store.login("jane@x.com", "secret1"), Err(StoreError::Storage(_))));

        assert_eq!(
            store.storage().load("fitbuddy-users").unwrap().as_deref(),
            Some(truncated)
        );
    }

    #[test]
    fn test_file_backed_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let session = ProfileStore::new(FileStore::new(dir.path()))
            .register("Jane", "jane@x.com", "secret1")
            .unwrap();

        let store = ProfileStore::new(FileStore::new(dir.path()));
        store.login("jane@x.com", "secret1").unwrap();
        store
            .modify_profile(&session, |p| p.dashboard.log_water(2.0))
            .unwrap();

        let reopened = ProfileStore::new(FileStore::new(dir.path()));
        assert_eq!(reopened.current_session().unwrap(), Some(session.clone()));
        assert_eq!(
            reopened.load_profile(&session).unwrap().dashboard.current_water_intake,
            2.0
        );
    }
}
