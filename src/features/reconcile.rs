// Profile reconciliation
// Rebuilds a complete profile from stored JSON, one section and one leaf at a time

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::profile::{
    default_week, BodyPartGoal, DashboardSection, DayActivity, UserProfile, SECTION_NAMES,
    WEEKDAYS,
};

/// Result of reconciling raw stored text
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub profile: UserProfile,
    /// Why stored data was discarded, when it was unreadable
    pub recovered_from: Option<String>,
}

/// Merge a stored (possibly partial, possibly legacy) profile over `defaults`.
///
/// Per section, every stored leaf wins over the default unless it has the
/// wrong type for that field, in which case the default is kept. Leaves and
/// sections the schema does not know are carried through untouched. Never
/// fails: anything that is not a JSON object yields `defaults`.
pub fn reconcile(stored: Option<&Value>, defaults: &UserProfile) -> UserProfile {
    let stored = match stored {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => return defaults.clone(),
        Some(_) => {
            debug!("Stored profile is not an object, using defaults");
            return defaults.clone();
        }
    };
    let section = |name: &str| stored.get(name).and_then(Value::as_object);

    let mut extra = defaults.extra.clone();
    for (key, value) in stored {
        if !SECTION_NAMES.contains(&key.as_str()) {
            extra.insert(key.clone(), value.clone());
        }
    }

    UserProfile {
        profile: merge_section(&defaults.profile, section("profile")),
        goals: merge_section(&defaults.goals, section("goals")),
        preferences: merge_section(&defaults.preferences, section("preferences")),
        dashboard: merge_dashboard(&defaults.dashboard, section("dashboard")),
        progress: merge_section(&defaults.progress, section("progress")),
        notifications: merge_section(&defaults.notifications, section("notifications")),
        appearance: merge_section(&defaults.appearance, section("appearance")),
        subscription: merge_section(&defaults.subscription, section("subscription")),
        extra,
    }
}

/// Parse stored text and reconcile it; unreadable text falls back to defaults
pub fn reconcile_json(raw: Option<&str>, defaults: &UserProfile) -> Reconciled {
    let Some(raw) = raw else {
        return Reconciled {
            profile: defaults.clone(),
            recovered_from: None,
        };
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Object(_) | Value::Null)) => Reconciled {
            profile: reconcile(Some(&value), defaults),
            recovered_from: None,
        },
        Ok(_) => {
            warn!("Stored user profile is not a JSON object, resetting to default");
            Reconciled {
                profile: defaults.clone(),
                recovered_from: Some("expected a JSON object".to_string()),
            }
        }
        Err(e) => {
            warn!("Error parsing user profile, resetting to default: {}", e);
            Reconciled {
                profile: defaults.clone(),
                recovered_from: Some(e.to_string()),
            }
        }
    }
}

/// Overlay stored leaves on one flat section
pub fn merge_section<T>(defaults: &T, stored: Option<&Map<String, Value>>) -> T
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(stored) = stored else {
        return defaults.clone();
    };
    let mut merged = match serde_json::to_value(defaults) {
        Ok(Value::Object(map)) => map,
        _ => return defaults.clone(),
    };

    for (key, value) in stored {
        // Unknown leaves have nothing to conflict with and are kept as-is
        if let Some(previous) = merged.insert(key.clone(), value.clone()) {
            if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
                debug!("Ignoring stored '{}' with unexpected type: {}", key, value);
                merged.insert(key.clone(), previous);
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        warn!("Failed to rebuild profile section, using defaults: {}", e);
        defaults.clone()
    })
}

fn merge_dashboard(defaults: &DashboardSection, stored: Option<&Map<String, Value>>) -> DashboardSection {
    let Some(stored) = stored else {
        return defaults.clone();
    };

    let mut scalars = stored.clone();
    let week = scalars.remove("weeklyActivityData");
    let goals = scalars.remove("bodyPartGoals");

    let mut dashboard = merge_section(defaults, Some(&scalars));
    dashboard.weekly_activity_data = repair_week(week.as_ref());
    dashboard.body_part_goals = body_part_goals(goals.as_ref());
    dashboard
}

/// A stored week is only trusted at exactly seven entries; weekday alignment
/// cannot be inferred from any other length
fn repair_week(stored: Option<&Value>) -> [DayActivity; 7] {
    let mut week = default_week();
    match stored {
        Some(Value::Array(days)) if days.len() == WEEKDAYS.len() => {
            for (slot, entry) in week.iter_mut().zip(days) {
                *slot = merge_section(slot, entry.as_object());
            }
        }
        Some(other) => {
            debug!(
                "Replacing weeklyActivityData of unexpected shape ({} entries)",
                other.as_array().map_or(0, Vec::len)
            );
        }
        None => {}
    }
    week
}

/// Stored goals in order; entries that are not `{bodyPart, count}` are skipped
fn body_part_goals(stored: Option<&Value>) -> Vec<BodyPartGoal> {
    let Some(Value::Array(items)) = stored else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<BodyPartGoal>(item.clone()) {
            Ok(goal) => Some(goal),
            Err(e) => {
                debug!("Skipping malformed body part goal {}: {}", item, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::numeric::Numeric;
    use crate::models::profile::{get_default_profile, Gender, Theme};
    use serde_json::json;

    fn defaults() -> UserProfile {
        get_default_profile("Jane", "jane@x.com")
    }

    fn round_trip(profile: &UserProfile) -> Value {
        serde_json::to_value(profile).unwrap()
    }

    fn samples() -> Vec<Option<Value>> {
        vec![
            None,
            Some(json!(null)),
            Some(json!({})),
            Some(round_trip(&defaults())),
            Some(json!({"profile": {"weight": "68", "gender": "Female", "shoeSize": 41}})),
            Some(json!({"dashboard": {"weeklyActivityData": [{"day": "Mon"}], "dailyWaterGoal": "ten"}})),
            Some(json!({"appearance": {"theme": "neon", "fontSize": "large"}, "beta": {"x": 1}})),
            Some(json!({"progress": {"streak": -3, "totalWorkouts": "12"}})),
        ]
    }

    #[test]
    fn test_totality() {
        for stored in samples() {
            let merged = reconcile(stored.as_ref(), &defaults());
            let value = round_trip(&merged);
            let default_value = round_trip(&defaults());
            for section in SECTION_NAMES {
                let keys = default_value[section].as_object().unwrap().keys();
                for key in keys {
                    assert!(
                        value[section].get(key).is_some(),
                        "{}.{} missing for {:?}",
                        section,
                        key,
                        stored
                    );
                }
            }
            assert_eq!(merged.dashboard.weekly_activity_data.len(), 7);
        }
    }

    #[test]
    fn test_idempotence() {
        for stored in samples() {
            let once = reconcile(stored.as_ref(), &defaults());
            let twice = reconcile(Some(&round_trip(&once)), &defaults());
            assert_eq!(once, twice, "not idempotent for {:?}", stored);
        }
    }

    #[test]
    fn test_stored_leaf_wins_and_absent_leaf_defaults() {
        let stored = json!({
            "profile": {"name": "Janet", "weight": 68},
            "notifications": {"notifyPromotions": true}
        });
        let merged = reconcile(Some(&stored), &defaults());
        assert_eq!(merged.profile.name, "Janet");
        assert_eq!(merged.profile.email, "jane@x.com");
        assert_eq!(merged.profile.weight, Numeric::Number(68.0));
        assert_eq!(merged.profile.gender, Gender::PreferNotToSay);
        assert!(merged.notifications.notify_promotions);
        assert!(merged.notifications.notify_workouts);
    }

    #[test]
    fn test_no_data_loss_when_one_field_changes() {
        let mut before = reconcile(
            Some(&json!({
                "profile": {"weight": 70, "height": 175},
                "dashboard": {"currentWaterIntake": 5, "bodyPartGoals": [{"bodyPart": "legs", "count": 2}]},
                "appearance": {"theme": "dark"}
            })),
            &defaults(),
        );
        before.dashboard.record_day(chrono::Weekday::Wed, 40.0, true);

        let mut stored = round_trip(&before);
        stored["profile"]["name"] = json!("Janet");
        let after = reconcile(Some(&stored), &defaults());

        assert_eq!(after.profile.name, "Janet");
        assert_eq!(after.profile.weight, before.profile.weight);
        for section in SECTION_NAMES.iter().filter(|s| **s != "profile") {
            assert_eq!(round_trip(&after)[section], round_trip(&before)[section]);
        }
    }

    #[test]
    fn test_wrong_types_keep_defaults() {
        let stored = json!({
            "profile": {"gender": "Robot", "age": true, "photo": null},
            "dashboard": {"dailyWaterGoal": "ten", "dailySleepHoursGoal": "8"},
            "appearance": {"theme": "neon", "reduceMotion": "yes", "fontSize": "large"},
            "progress": {"streak": -3, "totalWorkouts": "12"}
        });
        let merged = reconcile(Some(&stored), &defaults());
        assert_eq!(merged.profile.gender, Gender::PreferNotToSay);
        assert_eq!(merged.profile.age, Numeric::Empty);
        assert_eq!(merged.profile.photo, "");
        assert_eq!(merged.dashboard.daily_water_goal, 8.0);
        assert_eq!(merged.dashboard.daily_sleep_hours_goal, 8.0);
        assert_eq!(merged.appearance.theme, Theme::Light);
        assert!(!merged.appearance.reduce_motion);
        assert_eq!(round_trip(&merged)["appearance"]["fontSize"], json!("large"));
        assert_eq!(merged.progress.streak, 0);
        assert_eq!(merged.progress.total_workouts, 12);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let stored = json!({"profile": {"weight": "68", "height": "abc", "age": ""}});
        let merged = reconcile(Some(&stored), &defaults());
        assert_eq!(merged.profile.weight, Numeric::Number(68.0));
        assert_eq!(merged.profile.height, Numeric::Empty);
        assert_eq!(round_trip(&merged)["profile"]["weight"], json!(68));
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let stored = json!({
            "profile": {"shoeSize": 41},
            "futureSection": {"enabled": true}
        });
        let merged = reconcile(Some(&stored), &defaults());
        let value = round_trip(&merged);
        assert_eq!(value["profile"]["shoeSize"], json!(41));
        assert_eq!(value["futureSection"], json!({"enabled": true}));
    }

    #[test]
    fn test_week_of_wrong_length_is_replaced() {
        for len in [0usize, 3, 10] {
            let days: Vec<Value> = (0..len)
                .map(|i| json!({"day": format!("D{}", i), "activity": 50, "completedSession": true}))
                .collect();
            let stored = json!({"dashboard": {"weeklyActivityData": days}});
            let merged = reconcile(Some(&stored), &defaults());
            assert_eq!(merged.dashboard.weekly_activity_data, default_week(), "length {}", len);
        }
    }

    #[test]
    fn test_week_of_wrong_type_is_replaced() {
        let stored = json!({"dashboard": {"weeklyActivityData": "Mon,Tue"}});
        let merged = reconcile(Some(&stored), &defaults());
        assert_eq!(merged.dashboard.weekly_activity_data, default_week());
    }

    #[test]
    fn test_legacy_week_gains_completed_flag() {
        let days: Vec<Value> = WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, day)| json!({"day": day, "activity": i * 10}))
            .collect();
        let stored = json!({"dashboard": {"weeklyActivityData": days}});
        let merged = reconcile(Some(&stored), &defaults());
        let week = &merged.dashboard.weekly_activity_data;
        assert_eq!(week[3].day, "Thu");
        assert_eq!(week[3].activity, 30.0);
        assert!(week.iter().all(|d| !d.completed_session));
        assert_eq!(
            round_trip(&merged)["dashboard"]["weeklyActivityData"][1],
            json!({"day": "Tue", "activity": 10, "completedSession": false})
        );
    }

    #[test]
    fn test_week_entry_missing_day_uses_position() {
        let mut days = vec![json!({"activity": 5}); 7];
        days[6] = json!("garbage");
        let stored = json!({"dashboard": {"weeklyActivityData": days}});
        let merged = reconcile(Some(&stored), &defaults());
        let week = &merged.dashboard.weekly_activity_data;
        assert_eq!(week[0].day, "Mon");
        assert_eq!(week[0].activity, 5.0);
        assert_eq!(week[6], DayActivity::rest_day("Sun"));
    }

    #[test]
    fn test_body_part_goals_verbatim() {
        let stored = json!({"dashboard": {"bodyPartGoals": [
            {"bodyPart": "legs", "count": 2},
            {"oops": true},
            {"bodyPart": "chest", "count": 1, "note": "bench"}
        ]}});
        let merged = reconcile(Some(&stored), &defaults());
        let goals = &merged.dashboard.body_part_goals;
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].body_part, "legs");
        assert_eq!(goals[1].body_part, "chest");
        assert_eq!(goals[1].extra.get("note"), Some(&json!("bench")));

        let merged = reconcile(Some(&json!({"dashboard": {}})), &defaults());
        assert!(merged.dashboard.body_part_goals.is_empty());
    }

    #[test]
    fn test_weekly_session_goal_partial() {
        let stored = json!({"dashboard": {"weeklySessionGoal": {"count": 5}}});
        let merged = reconcile(Some(&stored), &defaults());
        assert_eq!(merged.dashboard.weekly_session_goal.count, 5);
        assert_eq!(merged.dashboard.weekly_session_goal.session_type, "any");
    }

    #[test]
    fn test_weekly_session_goal_keeps_unknown_fields() {
        let stored = json!({"dashboard": {"weeklySessionGoal": {"count": 4, "unit": "week"}}});
        let merged = reconcile(Some(&stored), &defaults());
        let saved = serde_json::to_value(&merged).unwrap();
        assert_eq!(
            saved["dashboard"]["weeklySessionGoal"],
            json!({"count": 4, "type": "any", "unit": "week"})
        );
    }

    #[test]
    fn test_non_object_sections_and_documents() {
        let merged = reconcile(Some(&json!({"profile": "oops"})), &defaults());
        assert_eq!(merged.profile, defaults().profile);

        assert_eq!(reconcile(Some(&json!([1, 2, 3])), &defaults()), defaults());
        assert_eq!(reconcile(Some(&json!("text")), &defaults()), defaults());
    }

    #[test]
    fn test_reconcile_json() {
        let result = reconcile_json(Some("{not json"), &defaults());
        assert_eq!(result.profile, defaults());
        assert!(result.recovered_from.is_some());

        let result = reconcile_json(Some("42"), &defaults());
        assert_eq!(result.profile, defaults());
        assert!(result.recovered_from.is_some());

        let result = reconcile_json(None, &defaults());
        assert_eq!(result.profile, defaults());
        assert_eq!(result.recovered_from, None);

        let result = reconcile_json(Some(r#"{"goals": {"target": "5k run"}}"#), &defaults());
        assert_eq!(result.profile.goals.target, "5k run");
        assert_eq!(result.recovered_from, None);
    }
}
