// Editable field table for the user profile
// Maps each `section.field` path to the kind of value it accepts

use std::str::FromStr;

use super::profile::{Choice, FitnessLevel, FontSize, Gender, Plan, Theme};

/// How raw input for a field is classified and coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, stored as-is
    Text,
    /// Text that must look like local@domain.tld once non-empty
    Email,
    /// Empty or an image data URI
    Photo,
    /// Number or the empty "not entered" sentinel, never negative
    OptionalNumber,
    /// Required finite number, never negative
    Number,
    /// Non-negative whole number
    Count,
    /// Boolean toggle
    Flag,
    /// One of the display strings of a profile enum
    Choice(ChoiceKind),
}

/// Which profile enum a choice field is backed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    Gender,
    FitnessLevel,
    Theme,
    FontSize,
    Plan,
}

impl ChoiceKind {
    pub fn allowed(self) -> Vec<&'static str> {
        match self {
            ChoiceKind::Gender => Gender::allowed(),
            ChoiceKind::FitnessLevel => FitnessLevel::allowed(),
            ChoiceKind::Theme => Theme::allowed(),
            ChoiceKind::FontSize => FontSize::allowed(),
            ChoiceKind::Plan => Plan::allowed(),
        }
    }

    /// Stored spelling of `raw`, matched case-insensitively
    pub fn canonical(self, raw: &str) -> Option<&'static str> {
        fn parse<T: Choice + FromStr>(raw: &str) -> Option<&'static str> {
            raw.parse::<T>().ok().map(|c| c.as_str())
        }

        match self {
            ChoiceKind::Gender => parse::<Gender>(raw),
            ChoiceKind::FitnessLevel => parse::<FitnessLevel>(raw),
            ChoiceKind::Theme => parse::<Theme>(raw),
            ChoiceKind::FontSize => parse::<FontSize>(raw),
            ChoiceKind::Plan => parse::<Plan>(raw),
        }
    }
}

const FIELDS: &[(&str, FieldKind)] = &[
    ("profile.name", FieldKind::Text),
    ("profile.email", FieldKind::Email),
    ("profile.age", FieldKind::OptionalNumber),
    ("profile.gender", FieldKind::Choice(ChoiceKind::Gender)),
    ("profile.height", FieldKind::OptionalNumber),
    ("profile.weight", FieldKind::OptionalNumber),
    ("profile.photo", FieldKind::Photo),
    ("profile.fitnessLevel", FieldKind::Choice(ChoiceKind::FitnessLevel)),
    ("profile.goalWeight", FieldKind::OptionalNumber),
    ("goals.type", FieldKind::Text),
    ("goals.target", FieldKind::Text),
    ("goals.timeframe", FieldKind::Text),
    ("preferences.workouts", FieldKind::Text),
    ("preferences.equipment", FieldKind::Text),
    ("preferences.time", FieldKind::Text),
    ("dashboard.weeklyActivityMinutesGoal", FieldKind::Number),
    ("dashboard.weeklySessionGoal.count", FieldKind::Count),
    ("dashboard.weeklySessionGoal.type", FieldKind::Text),
    ("dashboard.dailyWaterGoal", FieldKind::Number),
    ("dashboard.currentWaterIntake", FieldKind::Number),
    ("dashboard.dailySleepHoursGoal", FieldKind::Number),
    ("dashboard.currentSleepHours", FieldKind::Number),
    ("progress.bodyMeasurements", FieldKind::Text),
    ("progress.totalWorkouts", FieldKind::Count),
    ("progress.streak", FieldKind::Count),
    ("progress.favoriteExercises", FieldKind::Text),
    ("progress.activeDaysTimes", FieldKind::Text),
    ("progress.caloriesBurned", FieldKind::Number),
    ("notifications.notifyWorkouts", FieldKind::Flag),
    ("notifications.notifyProgress", FieldKind::Flag),
    ("notifications.notifyPromotions", FieldKind::Flag),
    ("appearance.theme", FieldKind::Choice(ChoiceKind::Theme)),
    ("appearance.fontSize", FieldKind::Choice(ChoiceKind::FontSize)),
    ("appearance.reduceMotion", FieldKind::Flag),
    ("subscription.plan", FieldKind::Choice(ChoiceKind::Plan)),
];

/// Look up the kind of an editable field by its dotted path
pub fn field_kind(path: &str) -> Option<FieldKind> {
    FIELDS
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, kind)| *kind)
}

/// All editable field paths, in document order
pub fn editable_fields() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|(p, _)| *p)
}
