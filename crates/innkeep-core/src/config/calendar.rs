//! Weekly calendar projection settings.

use serde::{Deserialize, Serialize};

/// Controls how bookings are laid out on the weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Emit a row for rooms that have no occupied day in the window.
    #[serde(default)]
    pub show_empty_rooms: bool,
    /// Show cancelled bookings on the grid.
    #[serde(default)]
    pub include_cancelled: bool,
    /// First day of the week, e.g. `"monday"` or `"sun"`.
    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            show_empty_rooms: false,
            include_cancelled: false,
            week_starts_on: default_week_starts_on(),
        }
    }
}

fn default_week_starts_on() -> String {
    "monday".to_string()
}
