//! History series builder: readings to chart-ready points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{Bounds, Reading};
use crate::normalize::normalize;
use crate::time_format::{time_text, TimeFormat};

// ---

/// One chart point: the reading time label and its (possibly normalized) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Build a chart series from the most recent `limit` readings.
///
/// `readings` must already be ordered oldest-first; they are never re-sorted,
/// so a caller that passes them newest-first gets a visibly reversed chart.
/// When `bounds` is given each value is normalized and rounded to a whole
/// percentage, otherwise the raw value is kept.
///
/// A reading whose selected value is NaN is a gap: it still counts toward
/// the window but produces no point. Infinite values clamp to 0 or 100 like
/// [`normalize`] does. An empty input yields an empty series.
pub fn build_series<F>(
    readings: &[Reading],
    select: F,
    bounds: Option<&Bounds>,
    limit: usize,
    format: &dyn TimeFormat,
) -> Result<Vec<SeriesPoint>>
where
    F: Fn(&Reading) -> f64,
{
    // ---
    if readings.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bounds) = bounds {
        bounds.validate()?;
    }

    let window = &readings[readings.len().saturating_sub(limit)..];
    let mut series = Vec::with_capacity(window.len());

    for reading in window {
        let raw = select(reading);
        if raw.is_nan() {
            debug!("Skipping gap at {}: value {}", reading.timestamp, raw);
            continue;
        }

        let value = match bounds {
            Some(bounds) => normalize(raw, bounds)?.round(),
            None => raw,
        };

        series.push(SeriesPoint {
            label: time_text(format, Some(reading.timestamp)),
            value,
        });
    }

    Ok(series)
}
