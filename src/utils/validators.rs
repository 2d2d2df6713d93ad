// Field validators
// Pure checks and coercions applied to raw user input before it reaches a profile

use base64::{engine::general_purpose, Engine as _};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::numeric::Numeric;
use crate::models::schema::FieldKind;
use crate::models::workout_log::TIME_FORMAT;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Email is required.")]
    EmailRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail(String),

    #[error("Password must be at least {} characters long.", MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: String, value: String },

    #[error("{field} is required")]
    MissingNumber { field: String },

    #[error("{field} cannot be negative")]
    NegativeNumber { field: String, value: f64 },

    #[error("{field}: '{value}' must be a whole number of 0 or more")]
    InvalidCount { field: String, value: String },

    #[error("{field}: '{value}' must be 'true' or 'false'")]
    InvalidBoolean { field: String, value: String },

    #[error("{field}: '{value}' must be one of: {allowed}")]
    InvalidChoice {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Please upload a valid image file.")]
    InvalidPhoto,

    #[error("Invalid time '{0}', expected HH:mm")]
    InvalidTime(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ValidationError {
    /// Errors that block saving the whole form rather than a single field
    pub fn blocks_save(&self) -> bool {
        matches!(
            self,
            ValidationError::EmailRequired | ValidationError::InvalidEmail(_)
        )
    }
}

/// local@domain.tld shape check; empty is not valid
pub fn validate_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Parse with float semantics; anything unparseable is the empty sentinel
pub fn coerce_numeric(value: &str) -> Numeric {
    Numeric::parse(value)
}

/// "Not yet entered" counts as valid
pub fn is_non_negative(value: Numeric) -> bool {
    match value {
        Numeric::Number(v) => v.is_finite() && v >= 0.0,
        Numeric::Empty => true,
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Registration requires every field, a valid email and a long enough password
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !validate_email(email.trim()) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    validate_password(password)
}

/// Empty, or a `data:image/<type>;base64,<payload>` URI with a decodable payload
pub fn validate_photo(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let Some(rest) = value.strip_prefix("data:image/") else {
        return false;
    };
    let Some((_, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    !payload.is_empty() && general_purpose::STANDARD.decode(payload).is_ok()
}

/// Build a profile photo data URI from raw image bytes
pub fn photo_data_uri(bytes: &[u8], mime: &str) -> Result<String, ValidationError> {
    if !mime.starts_with("image/") || bytes.is_empty() {
        return Err(ValidationError::InvalidPhoto);
    }
    Ok(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    ))
}

/// Workout start time, HH:mm
pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

/// Outcome of classifying raw input for one field.
///
/// `value` is what the draft should now hold (`None` leaves it unchanged);
/// `error` is the field-level message to show, if any. Both can be set: an
/// invalid email or a negative number is kept in the draft but flagged.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub value: Option<Value>,
    pub error: Option<ValidationError>,
}

impl Classified {
    fn ok(value: Value) -> Self {
        Self {
            value: Some(value),
            error: None,
        }
    }

    fn flagged(value: Value, error: ValidationError) -> Self {
        Self {
            value: Some(value),
            error: Some(error),
        }
    }

    fn rejected(error: ValidationError) -> Self {
        Self {
            value: None,
            error: Some(error),
        }
    }
}

/// Turn raw text into the JSON value a field of `kind` stores
pub fn classify_field(field: &str, kind: FieldKind, raw: &str) -> Classified {
    match kind {
        FieldKind::Text => Classified::ok(json!(raw)),
        FieldKind::Email => {
            let email = raw.trim();
            if email.is_empty() || validate_email(email) {
                Classified::ok(json!(email))
            } else {
                Classified::flagged(json!(email), ValidationError::InvalidEmail(email.to_string()))
            }
        }
        FieldKind::Photo => {
            if validate_photo(raw) {
                Classified::ok(json!(raw))
            } else {
                Classified::rejected(ValidationError::InvalidPhoto)
            }
        }
        FieldKind::OptionalNumber => {
            let value = coerce_numeric(raw);
            if is_non_negative(value) {
                Classified::ok(json!(value))
            } else {
                Classified::flagged(
                    json!(value),
                    ValidationError::NegativeNumber {
                        field: field.to_string(),
                        value: value.as_f64().unwrap_or_default(),
                    },
                )
            }
        }
        FieldKind::Number => match coerce_numeric(raw) {
            Numeric::Number(v) if v >= 0.0 => Classified::ok(json!(Numeric::Number(v))),
            Numeric::Number(v) => Classified::flagged(
                json!(Numeric::Number(v)),
                ValidationError::NegativeNumber {
                    field: field.to_string(),
                    value: v,
                },
            ),
            Numeric::Empty if raw.trim().is_empty() => {
                Classified::rejected(ValidationError::MissingNumber {
                    field: field.to_string(),
                })
            }
            Numeric::Empty => Classified::rejected(ValidationError::InvalidNumber {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        },
        FieldKind::Count => match raw.trim().parse::<u32>() {
            Ok(n) => Classified::ok(json!(n)),
            Err(_) => Classified::rejected(ValidationError::InvalidCount {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        },
        FieldKind::Flag => match raw.trim() {
            "true" => Classified::ok(json!(true)),
            "false" => Classified::ok(json!(false)),
            _ => Classified::rejected(ValidationError::InvalidBoolean {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        },
        FieldKind::Choice(kind) => match kind.canonical(raw) {
            Some(canonical) => Classified::ok(json!(canonical)),
            None => Classified::rejected(ValidationError::InvalidChoice {
                field: field.to_string(),
                value: raw.to_string(),
                allowed: kind.allowed().join(", "),
            }),
        },
    }
}
