use itertools::Itertools;

use super::TimeEntry;

const MINUTES_PER_HOUR: f64 = 60.0;
/// The daily average always spreads the week over all seven days.
const DAYS_PER_WEEK: f64 = 7.0;

/// Aggregated hours of one user's week.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeeklySummary {
    pub total_hours: f64,
    /// Every logged hour is currently billable, so this equals `total_hours`.
    pub billable_hours: f64,
    /// Number of distinct projects the entries were logged against.
    pub projects: usize,
    pub average_daily: f64,
}

impl WeeklySummary {
    /// Reduce already date-filtered entries into a summary.
    ///
    /// An empty slice yields an all-zero summary.
    pub fn from_entries(entries: &[TimeEntry]) -> Self {
        let total_minutes: i64 = entries.iter().map(|e| i64::from(e.minutes)).sum();
        let total_hours = round2(total_minutes as f64 / MINUTES_PER_HOUR);
        let projects = entries.iter().map(|e| e.project_id).unique().count();

        Self {
            total_hours,
            billable_hours: total_hours,
            projects,
            average_daily: round2(total_hours / DAYS_PER_WEEK),
        }
    }
}

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
