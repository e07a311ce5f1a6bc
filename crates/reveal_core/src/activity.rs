use std::sync::LazyLock;

use regex::Regex;

/// Headings that identify the activity widget. Compared by exact equality.
pub const ACTIVITY_HEADINGS: [&str; 2] = ["Activity", "System Activity"];

static ACTIVITY_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+[0-9]{1,2},\s+[0-9]{4}$")
        .expect("activity date pattern compiles")
});

pub fn is_activity_heading(text: &str) -> bool {
    ACTIVITY_HEADINGS.contains(&text)
}

/// Matches `Mon D, YYYY` / `Mon DD, YYYY` after trimming, e.g. `Jan 5, 2024`.
///
/// Only the shape is checked; `Feb 31, 2024` is accepted.
pub fn is_activity_date(text: &str) -> bool {
    ACTIVITY_DATE_RE.is_match(text.trim())
}
