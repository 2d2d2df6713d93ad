// Profile editing session
// Draft edits with field-level validation; committing reverts fields that are still invalid

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::features::reconcile::reconcile;
use crate::models::profile::UserProfile;
use crate::models::schema::field_kind;
use crate::utils::validators::{classify_field, validate_email, ValidationError};

/// Result of a successful commit
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCommit {
    pub profile: UserProfile,
    /// Fields whose invalid draft value was dropped in favour of the saved one
    pub reverted: Vec<(String, ValidationError)>,
}

/// An in-progress edit of one profile
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    original: UserProfile,
    draft: UserProfile,
    errors: BTreeMap<String, ValidationError>,
}

impl ProfileEditor {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            draft: profile.clone(),
            original: profile,
            errors: BTreeMap::new(),
        }
    }

    pub fn draft(&self) -> &UserProfile {
        &self.draft
    }

    /// Current field-level errors keyed by dotted path
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Set one field from raw text.
    ///
    /// The draft may still change when an error is returned: an invalid email
    /// or a negative number is kept so the user can see and fix it.
    pub fn set(&mut self, path: &str, raw: &str) -> Result<(), ValidationError> {
        let kind = field_kind(path).ok_or_else(|| ValidationError::UnknownField(path.to_string()))?;
        let classified = classify_field(path, kind, raw);

        if let Some(value) = classified.value {
            self.apply(path, value);
        }

        match classified.error {
            Some(error) => {
                debug!("Field {} flagged: {}", path, error);
                self.errors.insert(path.to_string(), error.clone());
                Err(error)
            }
            None => {
                self.errors.remove(path);
                Ok(())
            }
        }
    }

    /// Validate the draft and produce the profile to save.
    ///
    /// A missing or malformed email blocks the save. Any other flagged field
    /// is reverted to its saved value.
    pub fn commit(&self) -> Result<ProfileCommit, ValidationError> {
        let email = self.draft.profile.email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !validate_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }

        let mut draft = to_json(&self.draft);
        let original = to_json(&self.original);
        let mut reverted = Vec::new();

        for (path, error) in &self.errors {
            if error.blocks_save() {
                continue;
            }
            let pointer = json_pointer(path);
            if let (Some(slot), Some(saved)) = (draft.pointer_mut(&pointer), original.pointer(&pointer)) {
                *slot = saved.clone();
                reverted.push((path.clone(), error.clone()));
            }
        }

        Ok(ProfileCommit {
            profile: reconcile(Some(&draft), &self.original),
            reverted,
        })
    }

    fn apply(&mut self, path: &str, value: Value) {
        let mut draft = to_json(&self.draft);
        if let Some(slot) = draft.pointer_mut(&json_pointer(path)) {
            *slot = value;
        }
        // Fields the value cannot be stored in keep their previous draft value
        self.draft = reconcile(Some(&draft), &self.draft);
    }
}

fn json_pointer(path: &str) -> String {
    format!("/{}", path.replace('.', "/"))
}

fn to_json(profile: &UserProfile) -> Value {
    serde_json::to_value(profile).unwrap_or_default()
}
