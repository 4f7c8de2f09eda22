use chrono::{DateTime, TimeZone, Utc};
use farmwatch::profiles::{self, PageDefaults};
use farmwatch::{
    build_series, build_view_model, classify, format_log, normalize, ActionRecord, Bounds,
    ClockFormat, Field, LogOptions, Reading, Severity, StatusScale, Subsystem, TelemetryError,
    Threshold,
};

// ---

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 26, hour, minute, 0).unwrap()
}

fn reading(timestamp: DateTime<Utc>, ration_weight: f64) -> Reading {
    // ---
    Reading {
        timestamp,
        temperature: 21.0,
        humidity: 60.0,
        luminosity: 450.0,
        ration_weight,
        water_level: true,
    }
}

fn action(
    id: &str,
    subsystem: Subsystem,
    actor_name: Option<&str>,
    quantity: Option<f64>,
    timestamp: DateTime<Utc>,
) -> ActionRecord {
    // ---
    ActionRecord {
        id: id.to_string(),
        subsystem,
        actor_name: actor_name.map(String::from),
        operation: "Liberação manual".to_string(),
        quantity,
        timestamp: Some(timestamp),
    }
}

fn food_page() -> farmwatch::SubsystemConfig {
    profiles::food(Bounds::new(100.0, 500.0), &PageDefaults::default()).unwrap()
}

#[test]
fn normalize_stays_within_percentage_range() {
    // ---
    let bounds = Bounds::new(100.0, 500.0);
    for value in [-1e9, -1.0, 0.0, 99.9, 100.0, 280.0, 500.0, 500.1, 1e9] {
        let pct = normalize(value, &bounds).unwrap();
        assert!((0.0..=100.0).contains(&pct), "{value} -> {pct}");
    }
    assert_eq!(normalize(50.0, &bounds).unwrap(), 0.0);
    assert_eq!(normalize(900.0, &bounds).unwrap(), 100.0);
}

#[test]
fn normalize_rejects_collapsed_or_inverted_bounds() {
    // ---
    for bounds in [Bounds::new(3.0, 3.0), Bounds::new(4.0, 3.0)] {
        assert!(matches!(
            normalize(3.0, &bounds),
            Err(TelemetryError::InvalidBounds { .. })
        ));
    }
}

#[test]
fn classify_is_monotonic_over_buckets() {
    // ---
    let scale = StatusScale::new(vec![
        Threshold::new(30.0, "Low", Severity::Low),
        Threshold::new(60.0, "Attention", Severity::Attention),
        Threshold::new(100.0, "Normal", Severity::Normal),
    ])
    .unwrap();

    assert_eq!(classify(0.0, &scale).label, "Low");
    assert_eq!(classify(30.0, &scale).label, "Low");
    assert_eq!(classify(31.0, &scale).label, "Attention");
    assert_eq!(classify(100.0, &scale).label, "Normal");
}

#[test]
fn series_of_nothing_is_empty() {
    // ---
    let clock = ClockFormat::utc();
    let series = build_series(&[], |r| r.ration_weight, None, 10, &clock).unwrap();
    assert!(series.is_empty());
}

#[test]
fn series_keeps_last_three_of_ten() {
    // ---
    let clock = ClockFormat::utc();
    let history: Vec<Reading> = (0..10)
        .map(|i| reading(at(6 + i, 0), 100.0 + 10.0 * i as f64))
        .collect();

    let series = build_series(&history, |r| r.ration_weight, None, 3, &clock).unwrap();

    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["13:00", "14:00", "15:00"]);
    assert_eq!(series[0].value, 170.0);
    assert_eq!(series[2].value, 190.0);
}

#[test]
fn log_filters_food_newest_first() {
    // ---
    let clock = ClockFormat::utc();
    let actions = vec![
        action("5", Subsystem::Food, Some("Joel"), Some(50.0), at(18, 0)),
        action("4", Subsystem::Water, None, Some(500.0), at(15, 0)),
        action("3", Subsystem::Food, Some("Ana"), Some(40.0), at(12, 0)),
        action("2", Subsystem::Light, None, None, at(10, 15)),
        action("1", Subsystem::Food, None, Some(30.0), at(8, 0)),
    ];
    let opts = LogOptions {
        subsystem: Some(Subsystem::Food),
        limit: 2,
        actor_fallback: "Sistema".to_string(),
    };

    let rows = format_log(&actions, &opts, &clock);

    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["5", "3"]);
    assert_eq!(rows[0].quantity_text, "50g");
}

#[test]
fn log_uses_fallback_actor() {
    // ---
    let clock = ClockFormat::utc();
    let actions = vec![action("1", Subsystem::Water, None, Some(500.0), at(9, 0))];
    let opts = LogOptions {
        subsystem: None,
        limit: 10,
        actor_fallback: "Sistema".to_string(),
    };

    assert_eq!(format_log(&actions, &opts, &clock)[0].actor, "Sistema");
}

#[test]
fn food_page_current_status() {
    // ---
    let clock = ClockFormat::utc();
    let current = reading(at(12, 0), 280.0);

    let view = build_view_model(Some(&current), &[], &[], &food_page(), &clock).unwrap();

    assert_eq!(view.current_percentage, Some(45.0));
    assert_eq!(view.status_label(), "Atenção");
    assert_eq!(view.severity(), Some(Severity::Attention));
}

#[test]
fn food_page_history_series() {
    // ---
    let clock = ClockFormat::utc();
    let history = vec![reading(at(8, 0), 450.0), reading(at(12, 0), 300.0)];

    let view = build_view_model(history.last(), &history, &[], &food_page(), &clock).unwrap();

    let points: Vec<(&str, f64)> = view
        .chart_series
        .iter()
        .map(|p| (p.label.as_str(), p.value))
        .collect();
    assert_eq!(points, [("08:00", 88.0), ("12:00", 50.0)]);
}

#[test]
fn water_page_action_rows() {
    // ---
    let clock = ClockFormat::utc();
    let actions = vec![
        action("1", Subsystem::Water, None, Some(500.0), at(10, 20)),
        action("2", Subsystem::Food, Some("Joel"), Some(50.0), at(8, 15)),
    ];
    let page = profiles::water(&PageDefaults::default());

    let view = build_view_model(None, &[], &actions, &page, &clock).unwrap();

    assert_eq!(view.history_rows.len(), 1);
    assert_eq!(view.history_rows[0].actor, "Sistema");
    assert_eq!(view.history_rows[0].quantity_text, "500ml");
    assert_eq!(view.history_rows[0].time_text, "10:20");
}

#[test]
fn water_page_float_switch() {
    // ---
    let clock = ClockFormat::from_offset_minutes(-180).unwrap();
    let mut dry = reading(at(11, 0), 300.0);
    dry.water_level = false;
    let history = vec![reading(at(10, 0), 300.0), dry.clone()];
    let page = profiles::water(&PageDefaults::default());

    let view = build_view_model(Some(&dry), &history, &[], &page, &clock).unwrap();

    assert_eq!(view.status_label(), "Nível Baixo");
    assert_eq!(view.current_percentage, Some(0.0));
    let points: Vec<(&str, f64)> = view
        .chart_series
        .iter()
        .map(|p| (p.label.as_str(), p.value))
        .collect();
    assert_eq!(points, [("07:00", 1.0), ("08:00", 0.0)]);
}

#[test]
fn view_model_is_idempotent() {
    // ---
    let clock = ClockFormat::utc();
    let history = vec![reading(at(8, 0), 450.0), reading(at(12, 0), 300.0)];
    let actions = vec![action("1", Subsystem::Food, Some("Joel"), Some(50.0), at(12, 5))];
    let page = food_page();

    let first = build_view_model(history.last(), &history, &actions, &page, &clock).unwrap();
    let second = build_view_model(history.last(), &history, &actions, &page, &clock).unwrap();

    assert_eq!(first, second);
}

#[test]
fn view_model_serializes_for_the_dashboard() {
    // ---
    let clock = ClockFormat::utc();
    let page = food_page();

    let view = build_view_model(None, &[], &[], &page, &clock).unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["subsystem"], "food");
    assert!(json["currentPercentage"].is_null());
    assert_eq!(json["displayText"], "--");
    assert!(json["chartSeries"].as_array().unwrap().is_empty());
}

#[test]
fn selects_fields_by_name() {
    // ---
    let r = reading(at(8, 0), 280.0);
    assert_eq!(Field::RationWeight.value(&r), 280.0);
    assert_eq!(Field::Luminosity.value(&r), 450.0);
}
