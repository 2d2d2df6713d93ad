// User profile data model
// One JSON document per user, stored under `userData_{email}`

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use super::numeric::{count, number, Numeric};

/// Top-level section names, in document order
pub const SECTION_NAMES: [&str; 8] = [
    "profile",
    "goals",
    "preferences",
    "dashboard",
    "progress",
    "notifications",
    "appearance",
    "subscription",
];

/// Weekday labels for `dashboard.weeklyActivityData`, Monday first
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A closed set of display values stored as plain strings
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Allowed values, for validation messages
    fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

/// Case-insensitive lookup shared by the `FromStr` impls below
fn parse_choice<T: Choice>(value: &str) -> Result<T, String> {
    T::ALL
        .iter()
        .copied()
        .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("Unknown value: {}", value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    #[default]
    PreferNotToSay,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Choice for FitnessLevel {
    const ALL: &'static [Self] = &[
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
        FitnessLevel::Expert,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
            FitnessLevel::Expert => "Expert",
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Choice for Theme {
    const ALL: &'static [Self] = &[Theme::Light, Theme::Dark, Theme::System];

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl Choice for FontSize {
    const ALL: &'static [Self] = &[FontSize::Small, FontSize::Medium, FontSize::Large];

    fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Premium,
}

impl Choice for Plan {
    const ALL: &'static [Self] = &[Plan::Free, Plan::Pro, Plan::Premium];

    fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Pro => "Pro",
            Plan::Premium => "Premium",
        }
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s)
    }
}

/// Identity and body measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSection {
    pub name: String,
    pub email: String,
    pub age: Numeric,
    pub gender: Gender,
    /// Centimetres
    pub height: Numeric,
    /// Kilograms
    pub weight: Numeric,
    /// `data:image/...;base64,` URI or empty
    pub photo: String,
    pub fitness_level: FitnessLevel,
    pub goal_weight: Numeric,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            age: Numeric::Empty,
            gender: Gender::default(),
            height: Numeric::Empty,
            weight: Numeric::Empty,
            photo: String::new(),
            fitness_level: FitnessLevel::default(),
            goal_weight: Numeric::Empty,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalsSection {
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target: String,
    pub timeframe: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GoalsSection {
    fn default() -> Self {
        Self {
            goal_type: "Maintain Fitness".to_string(),
            target: String::new(),
            timeframe: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesSection {
    pub workouts: String,
    pub equipment: String,
    pub time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Weekly session target, e.g. 3 sessions of any type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionGoal {
    #[serde(with = "count")]
    pub count: u32,
    #[serde(rename = "type")]
    pub session_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SessionGoal {
    fn default() -> Self {
        Self {
            count: 3,
            session_type: "any".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPartGoal {
    pub body_part: String,
    #[serde(with = "count")]
    pub count: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One weekday slot of the activity chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DayActivity {
    pub day: String,
    /// Minutes of activity
    #[serde(with = "number")]
    pub activity: f64,
    pub completed_session: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DayActivity {
    pub fn rest_day(day: &str) -> Self {
        Self {
            day: day.to_string(),
            ..Default::default()
        }
    }
}

/// A fresh Mon..Sun activity week
pub fn default_week() -> [DayActivity; 7] {
    WEEKDAYS.map(DayActivity::rest_day)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSection {
    #[serde(with = "number")]
    pub weekly_activity_minutes_goal: f64,
    pub weekly_session_goal: SessionGoal,
    pub body_part_goals: Vec<BodyPartGoal>,
    /// Cups
    #[serde(with = "number")]
    pub daily_water_goal: f64,
    #[serde(with = "number")]
    pub current_water_intake: f64,
    #[serde(with = "number")]
    pub daily_sleep_hours_goal: f64,
    #[serde(with = "number")]
    pub current_sleep_hours: f64,
    pub weekly_activity_data: [DayActivity; 7],
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            weekly_activity_minutes_goal: 300.0,
            weekly_session_goal: SessionGoal::default(),
            body_part_goals: Vec::new(),
            daily_water_goal: 8.0,
            current_water_intake: 0.0,
            daily_sleep_hours_goal: 7.5,
            current_sleep_hours: 0.0,
            weekly_activity_data: default_week(),
            extra: Map::new(),
        }
    }
}

impl DashboardSection {
    /// Add (or with a negative amount, remove) cups of water; never below zero
    pub fn log_water(&mut self, cups: f64) {
        if cups.is_finite() {
            self.current_water_intake = (self.current_water_intake + cups).max(0.0);
        }
    }

    pub fn set_sleep_hours(&mut self, hours: f64) {
        if hours.is_finite() {
            self.current_sleep_hours = hours.max(0.0);
        }
    }

    /// Overwrite one weekday slot of the activity chart
    pub fn record_day(&mut self, day: Weekday, minutes: f64, completed_session: bool) {
        let slot = &mut self.weekly_activity_data[day.num_days_from_monday() as usize];
        if minutes.is_finite() {
            slot.activity = minutes.max(0.0);
        }
        slot.completed_session = completed_session;
    }

    /// Start a new week, keeping the goals
    pub fn reset_week(&mut self) {
        self.weekly_activity_data = default_week();
    }

    /// Insert a body-part goal, or update the count of an existing one in place
    pub fn add_body_part_goal(&mut self, body_part: &str, count: u32) {
        let body_part = body_part.trim();
        match self
            .body_part_goals
            .iter_mut()
            .find(|g| g.body_part.eq_ignore_ascii_case(body_part))
        {
            Some(goal) => goal.count = count,
            None => self.body_part_goals.push(BodyPartGoal {
                body_part: body_part.to_string(),
                count,
                extra: Map::new(),
            }),
        }
    }

    /// Returns false when no goal matched
    pub fn remove_body_part_goal(&mut self, body_part: &str) -> bool {
        let before = self.body_part_goals.len();
        self.body_part_goals
            .retain(|g| !g.body_part.eq_ignore_ascii_case(body_part.trim()));
        self.body_part_goals.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSection {
    pub body_measurements: String,
    #[serde(with = "count")]
    pub total_workouts: u32,
    #[serde(with = "count")]
    pub streak: u32,
    pub favorite_exercises: String,
    pub active_days_times: String,
    #[serde(with = "number")]
    pub calories_burned: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProgressSection {
    fn default() -> Self {
        Self {
            body_measurements: String::new(),
            total_workouts: 0,
            streak: 0,
            favorite_exercises: String::new(),
            active_days_times: String::new(),
            calories_burned: 0.0,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationsSection {
    pub notify_workouts: bool,
    pub notify_progress: bool,
    pub notify_promotions: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for NotificationsSection {
    fn default() -> Self {
        Self {
            notify_workouts: true,
            notify_progress: true,
            notify_promotions: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceSection {
    pub theme: Theme,
    pub font_size: FontSize,
    pub reduce_motion: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionSection {
    pub plan: Plan,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full per-user settings and metrics record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserProfile {
    pub profile: ProfileSection,
    pub goals: GoalsSection,
    pub preferences: PreferencesSection,
    pub dashboard: DashboardSection,
    pub progress: ProgressSection,
    pub notifications: NotificationsSection,
    pub appearance: AppearanceSection,
    pub subscription: SubscriptionSection,
    /// Sections written by newer versions, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fresh, fully populated profile seeded with the account identity
pub fn get_default_profile(name: &str, email: &str) -> UserProfile {
    UserProfile {
        profile: ProfileSection {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}
