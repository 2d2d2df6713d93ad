// Formatting utilities

use chrono::NaiveDateTime;

/// Format duration in minutes to human readable (e.g., "2h 30m")
pub fn format_duration(minutes: i64) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        let hours = minutes / 60;
        let mins = minutes % 60;
        if mins > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    }
}

/// Whole-number percentage, e.g. "75%"
pub fn format_percent(percent: f64) -> String {
    format!("{:.0}%", percent)
}

/// Upper-case the first character, for API values like "upper legs"
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate string to max length (in characters) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Describe a workout time relative to now (e.g., "Tomorrow 08:00")
pub fn format_relative_day(when: NaiveDateTime, now: NaiveDateTime) -> String {
    let time = when.format("%H:%M");
    let days = (when.date() - now.date()).num_days();
    match days {
        0 => format!("Today {}", time),
        1 => format!("Tomorrow {}", time),
        -1 => format!("Yesterday {}", time),
        2..=6 => format!("{} {}", when.format("%A"), time),
        _ => when.format("%Y-%m-%d %H:%M").to_string(),
    }
}
