//! Telemetry facade: one parameterized view-model builder for every
//! subsystem page.
//!
//! Every page (water, food, light, fan) shares the same pipeline and differs
//! only in its [`SubsystemConfig`]: which field it reads, how that field is
//! calibrated and bucketed, and how many history points and log rows it shows.
//!
//! The builder is stateless. Everything it needs comes in as arguments, and
//! calling it twice with the same inputs yields equal [`ViewModel`]s.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action_log::{format_log, LogOptions, LogRow};
use crate::classify::{classify, classify_boolean, Severity, Status, StatusScale, SwitchLabels};
use crate::error::Result;
use crate::models::{ActionRecord, Bounds, Field, Reading, Subsystem};
use crate::normalize::normalize;
use crate::series::{build_series, SeriesPoint};
use crate::time_format::TimeFormat;

// ---

/// Card text when there is no current reading yet.
pub const VALUE_PLACEHOLDER: &str = "--";

/// Status label when there is no current reading yet.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// How a level gauge presents its value on cards and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueScale {
    /// Normalized percentage, e.g. `45%`.
    Percent,
    /// Raw value with the field unit, e.g. `23.5°C`.
    Raw,
}

/// How a subsystem turns its sensor into a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Gauge {
    /// A sensor with magnitude, bucketed by percentage.
    Level {
        field: Field,
        bounds: Bounds,
        scale: StatusScale,
        display: ValueScale,
    },
    /// A boolean sensor; any positive value reads as "on".
    Switch { field: Field, labels: SwitchLabels },
}

impl Gauge {
    pub fn field(&self) -> Field {
        match self {
            Gauge::Level { field, .. } | Gauge::Switch { field, .. } => *field,
        }
    }
}

/// Per-subsystem page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsystemConfig {
    pub subsystem: Subsystem,
    pub gauge: Gauge,
    pub history_limit: usize,
    pub action_limit: usize,
    pub actor_fallback: String,
}

impl SubsystemConfig {
    /// Catch configuration defects before any data is looked at.
    pub fn validate(&self) -> Result<()> {
        match &self.gauge {
            Gauge::Level { bounds, .. } => bounds.validate(),
            Gauge::Switch { .. } => Ok(()),
        }
    }

    fn log_options(&self) -> LogOptions {
        LogOptions {
            subsystem: Some(self.subsystem),
            limit: self.action_limit,
            actor_fallback: self.actor_fallback.clone(),
        }
    }
}

/// Render-ready bundle for one subsystem page.
///
/// The `current_*` fields and `status` are `None` until a reading exists;
/// zero is a valid sensor value and is never used to mean "no data".
///
/// `current_percentage` is rounded for display while `status` is classified
/// from the exact percentage, so a value just above a ceiling can show that
/// ceiling as its percentage next to the next bucket's label (221 g on a
/// 100–500 g feeder reads `30` and `Atenção`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub subsystem: Subsystem,
    pub current_value: Option<f64>,
    pub current_percentage: Option<f64>,
    pub status: Option<Status>,
    pub display_text: String,
    pub chart_series: Vec<SeriesPoint>,
    pub history_rows: Vec<LogRow>,
}

impl ViewModel {
    // ---
    pub fn status_label(&self) -> &str {
        self.status
            .as_ref()
            .map_or(UNKNOWN_LABEL, |s| s.label.as_str())
    }

    pub fn severity(&self) -> Option<Severity> {
        self.status.as_ref().map(|s| s.severity)
    }
}

/// Snapshot of the current reading as seen through one gauge.
struct Current {
    value: f64,
    percentage: f64,
    status: Status,
    display_text: String,
}

/// Build the view model of one subsystem page.
///
/// `history` must be oldest-first and `actions` newest-first. Only a
/// configuration defect is an error; missing data yields sentinels.
pub fn build_view_model(
    current: Option<&Reading>,
    history: &[Reading],
    actions: &[ActionRecord],
    config: &SubsystemConfig,
    format: &dyn TimeFormat,
) -> Result<ViewModel> {
    // ---
    config.validate()?;

    let snapshot = match current {
        Some(reading) => read_current(reading, &config.gauge)?,
        None => None,
    };
    if snapshot.is_none() {
        debug!("No current {} reading, status unknown", config.subsystem);
    }

    let chart_series = match &config.gauge {
        Gauge::Level {
            field,
            bounds,
            display: ValueScale::Percent,
            ..
        } => build_series(history, |r| field.value(r), Some(bounds), config.history_limit, format)?,
        gauge => {
            let field = gauge.field();
            build_series(history, |r| field.value(r), None, config.history_limit, format)?
        }
    };

    let history_rows = format_log(actions, &config.log_options(), format);

    debug!(
        "Built {} view: {} points, {} rows",
        config.subsystem,
        chart_series.len(),
        history_rows.len()
    );

    Ok(match snapshot {
        Some(c) => ViewModel {
            subsystem: config.subsystem,
            current_value: Some(c.value),
            current_percentage: Some(c.percentage),
            status: Some(c.status),
            display_text: c.display_text,
            chart_series,
            history_rows,
        },
        None => ViewModel {
            subsystem: config.subsystem,
            current_value: None,
            current_percentage: None,
            status: None,
            display_text: VALUE_PLACEHOLDER.to_string(),
            chart_series,
            history_rows,
        },
    })
}

fn read_current(reading: &Reading, gauge: &Gauge) -> Result<Option<Current>> {
    // ---
    let field = gauge.field();
    let value = field.value(reading);
    if value.is_nan() {
        warn!("Current {} is not a number, treating as missing", field.name());
        return Ok(None);
    }

    let current = match gauge {
        Gauge::Level {
            bounds,
            scale,
            display,
            ..
        } => {
            let percentage = normalize(value, bounds)?;
            let display_text = match display {
                ValueScale::Percent => format!("{}%", percentage.round()),
                ValueScale::Raw => format!("{}{}", round_tenth(value), field.unit()),
            };
            Current {
                value,
                percentage: percentage.round(),
                status: classify(percentage, scale),
                display_text,
            }
        }
        Gauge::Switch { labels, .. } => {
            let on = value > 0.0;
            let status = classify_boolean(on, labels);
            Current {
                value,
                percentage: if on { 100.0 } else { 0.0 },
                display_text: status.label.clone(),
                status,
            }
        }
    };

    Ok(Some(current))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::classify::Threshold;
    use crate::time_format::ClockFormat;
    use crate::TelemetryError;
    use chrono::{TimeZone, Utc};

    fn create_test_reading(hour: u32, ration_weight: f64) -> Reading {
        // ---
        Reading {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 26, hour, 0, 0).unwrap(),
            temperature: 22.04,
            humidity: 55.0,
            luminosity: 700.0,
            ration_weight,
            water_level: false,
        }
    }

    fn food_config(bounds: Bounds) -> SubsystemConfig {
        // ---
        SubsystemConfig {
            subsystem: Subsystem::Food,
            gauge: Gauge::Level {
                field: Field::RationWeight,
                bounds,
                scale: StatusScale::new(vec![
                    Threshold::new(30.0, "Baixo", Severity::Low),
                    Threshold::new(60.0, "Atenção", Severity::Attention),
                    Threshold::new(100.0, "Abastecido", Severity::Normal),
                ])
                .unwrap(),
                display: ValueScale::Percent,
            },
            history_limit: 10,
            action_limit: 10,
            actor_fallback: "Sistema".to_string(),
        }
    }

    #[test]
    fn test_current_level_status() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(100.0, 500.0));
        let current = create_test_reading(12, 280.0);

        let view = build_view_model(Some(&current), &[], &[], &config, &clock).unwrap();

        assert_eq!(view.current_percentage, Some(45.0));
        assert_eq!(view.current_value, Some(280.0));
        assert_eq!(view.status_label(), "Atenção");
        assert_eq!(view.severity(), Some(Severity::Attention));
        assert_eq!(view.display_text, "45%");
        assert!(view.chart_series.is_empty());
        assert!(view.history_rows.is_empty());
    }

    #[test]
    fn test_missing_current_is_unknown_not_zero() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(100.0, 500.0));

        let view = build_view_model(None, &[], &[], &config, &clock).unwrap();

        assert_eq!(view.current_percentage, None);
        assert_eq!(view.status, None);
        assert_eq!(view.status_label(), UNKNOWN_LABEL);
        assert_eq!(view.display_text, VALUE_PLACEHOLDER);
    }

    #[test]
    fn test_zero_reading_is_known() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(0.0, 500.0));
        let empty_feeder = create_test_reading(12, 0.0);

        let view = build_view_model(Some(&empty_feeder), &[], &[], &config, &clock).unwrap();
        assert_eq!(view.current_percentage, Some(0.0));
        assert_eq!(view.status_label(), "Baixo");
    }

    #[test]
    fn test_bad_bounds_fail_even_without_data() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(500.0, 100.0));

        let result = build_view_model(None, &[], &[], &config, &clock);
        assert!(matches!(result, Err(TelemetryError::InvalidBounds { .. })));
    }

    #[test]
    fn test_nan_current_is_unknown() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(100.0, 500.0));
        let broken = create_test_reading(12, f64::NAN);

        let view = build_view_model(Some(&broken), &[], &[], &config, &clock).unwrap();
        assert_eq!(view.status, None);
    }

    #[test]
    fn test_status_uses_exact_percentage() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(100.0, 500.0));
        let current = create_test_reading(12, 221.0);

        let view = build_view_model(Some(&current), &[], &[], &config, &clock).unwrap();

        // 30.25% rounds to 30 but sits above the "Baixo" ceiling
        assert_eq!(view.current_percentage, Some(30.0));
        assert_eq!(view.status_label(), "Atenção");
    }

    #[test]
    fn test_infinite_current_matches_chart() {
        // ---
        let clock = ClockFormat::utc();
        let config = food_config(Bounds::new(100.0, 500.0));
        let history = vec![create_test_reading(12, f64::INFINITY)];

        let view = build_view_model(history.last(), &history, &[], &config, &clock).unwrap();

        assert_eq!(view.current_percentage, Some(100.0));
        assert_eq!(view.status_label(), "Abastecido");
        assert_eq!(view.chart_series[0].value, 100.0);
    }

    #[test]
    fn test_raw_display_and_chart() {
        // ---
        let clock = ClockFormat::utc();
        let config = SubsystemConfig {
            subsystem: Subsystem::Fan,
            gauge: Gauge::Level {
                field: Field::Temperature,
                bounds: Bounds::new(15.0, 30.0),
                scale: StatusScale::new(vec![
                    Threshold::new(33.0, "Frio", Severity::Low),
                    Threshold::new(66.0, "Ideal", Severity::Normal),
                    Threshold::new(100.0, "Quente", Severity::High),
                ])
                .unwrap(),
                display: ValueScale::Raw,
            },
            history_limit: 10,
            action_limit: 10,
            actor_fallback: "Sistema".to_string(),
        };
        let history = vec![create_test_reading(8, 0.0), create_test_reading(9, 0.0)];

        let view =
            build_view_model(history.last(), &history, &[], &config, &clock).unwrap();

        assert_eq!(view.display_text, "22°C");
        assert_eq!(view.status_label(), "Ideal");
        assert_eq!(view.chart_series[0].value, 22.04);
    }

    #[test]
    fn test_switch_gauge() {
        // ---
        let clock = ClockFormat::utc();
        let config = SubsystemConfig {
            subsystem: Subsystem::Water,
            gauge: Gauge::Switch {
                field: Field::WaterLevel,
                labels: SwitchLabels::default(),
            },
            history_limit: 10,
            action_limit: 10,
            actor_fallback: "Sistema".to_string(),
        };
        let dry = create_test_reading(9, 0.0);

        let view = build_view_model(Some(&dry), &[dry.clone()], &[], &config, &clock).unwrap();

        assert_eq!(view.current_percentage, Some(0.0));
        assert_eq!(view.status_label(), "Low");
        assert_eq!(view.display_text, "Low");
        assert_eq!(view.chart_series[0].value, 0.0);
    }
}
