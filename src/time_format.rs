//! Injected timestamp formatting.
//!
//! The module never decides on a locale or timezone. Callers hand in a
//! [`TimeFormat`]; [`ClockFormat`] is the `HH:MM` fixed-offset formatter the
//! gateway uses.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Rendered in place of a timestamp that is missing or cannot be formatted.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// Turns an instant into the short label shown on charts and tables.
///
/// Returning `None` degrades that single label to [`TIME_PLACEHOLDER`].
pub trait TimeFormat {
    fn format(&self, at: DateTime<Utc>) -> Option<String>;
}

impl<F> TimeFormat for F
where
    F: Fn(DateTime<Utc>) -> Option<String>,
{
    fn format(&self, at: DateTime<Utc>) -> Option<String> {
        self(at)
    }
}

/// `HH:MM` wall-clock time at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ClockFormat {
    offset: FixedOffset,
}

impl ClockFormat {
    // ---
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// `None` when the offset is a day or more away from UTC.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::new)
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl TimeFormat for ClockFormat {
    fn format(&self, at: DateTime<Utc>) -> Option<String> {
        Some(at.with_timezone(&self.offset).format("%H:%M").to_string())
    }
}

/// Format an optional instant, falling back to the placeholder.
pub fn time_text(format: &dyn TimeFormat, at: Option<DateTime<Utc>>) -> String {
    at.and_then(|at| format.format(at))
        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
}
