//! Default page configuration of each farm subsystem.
//!
//! Thresholds differ in direction between subsystems (an empty feeder is
//! bad, a hot shed is bad too), so every subsystem carries its own table
//! instead of sharing one.

use tracing::warn;

use crate::classify::{Severity, Status, StatusScale, SwitchLabels, Threshold};
use crate::error::Result;
use crate::facade::{Gauge, SubsystemConfig, ValueScale};
use crate::models::{Bounds, FarmConfig, Field, Subsystem};

// ---

/// Feeder calibration used until the backend says otherwise, in grams.
pub const DEFAULT_RATION_BOUNDS: Bounds = Bounds::new(100.0, 500.0);

/// Comfortable shed temperature range, in °C.
pub const DEFAULT_TEMPERATURE_BOUNDS: Bounds = Bounds::new(15.0, 30.0);

/// Full LDR scale.
pub const DEFAULT_LUMINOSITY_BOUNDS: Bounds = Bounds::new(0.0, 1000.0);

/// Settings shared by every page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDefaults {
    pub history_limit: usize,
    pub action_limit: usize,
    pub actor_fallback: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            history_limit: 10,
            action_limit: 10,
            actor_fallback: "Sistema".to_string(),
        }
    }
}

fn page(subsystem: Subsystem, gauge: Gauge, defaults: &PageDefaults) -> SubsystemConfig {
    SubsystemConfig {
        subsystem,
        gauge,
        history_limit: defaults.history_limit,
        action_limit: defaults.action_limit,
        actor_fallback: defaults.actor_fallback.clone(),
    }
}

/// Feeder stock, shown as a percentage of the calibrated range.
pub fn food(bounds: Bounds, defaults: &PageDefaults) -> Result<SubsystemConfig> {
    // ---
    let scale = StatusScale::new(vec![
        Threshold::new(30.0, "Baixo", Severity::Low),
        Threshold::new(60.0, "Atenção", Severity::Attention),
        Threshold::new(100.0, "Abastecido", Severity::Normal),
    ])?;
    let gauge = Gauge::Level {
        field: Field::RationWeight,
        bounds,
        scale,
        display: ValueScale::Percent,
    };
    Ok(page(Subsystem::Food, gauge, defaults))
}

/// Reservoir float switch.
pub fn water(defaults: &PageDefaults) -> SubsystemConfig {
    // ---
    let labels = SwitchLabels {
        on: Status::new("Nível Alto", Severity::Normal),
        off: Status::new("Nível Baixo", Severity::Low),
    };
    let gauge = Gauge::Switch {
        field: Field::WaterLevel,
        labels,
    };
    page(Subsystem::Water, gauge, defaults)
}

/// Shed temperature, which drives the fan. Shown in °C.
pub fn fan(bounds: Bounds, defaults: &PageDefaults) -> Result<SubsystemConfig> {
    // ---
    let scale = StatusScale::new(vec![
        Threshold::new(33.0, "Frio", Severity::Low),
        Threshold::new(66.0, "Ideal", Severity::Normal),
        Threshold::new(100.0, "Quente", Severity::High),
    ])?;
    let gauge = Gauge::Level {
        field: Field::Temperature,
        bounds,
        scale,
        display: ValueScale::Raw,
    };
    Ok(page(Subsystem::Fan, gauge, defaults))
}

/// Ambient light from the LDR.
pub fn light(bounds: Bounds, defaults: &PageDefaults) -> Result<SubsystemConfig> {
    // ---
    let scale = StatusScale::new(vec![
        Threshold::new(20.0, "Escuro", Severity::Low),
        Threshold::new(100.0, "Iluminado", Severity::Normal),
    ])?;
    let gauge = Gauge::Level {
        field: Field::Luminosity,
        bounds,
        scale,
        display: ValueScale::Percent,
    };
    Ok(page(Subsystem::Light, gauge, defaults))
}

/// Every page with its built-in calibration, in dashboard order.
pub fn all(defaults: &PageDefaults) -> Result<Vec<SubsystemConfig>> {
    // ---
    Ok(vec![
        water(defaults),
        food(DEFAULT_RATION_BOUNDS, defaults)?,
        fan(DEFAULT_TEMPERATURE_BOUNDS, defaults)?,
        light(DEFAULT_LUMINOSITY_BOUNDS, defaults)?,
    ])
}

/// Every page, calibrated from the backend's farm configuration where it
/// provides usable ranges.
///
/// A backend range that is not a valid [`Bounds`] is logged and replaced by
/// the built-in one, so one bad setting never takes the other pages down.
pub fn from_farm_config(farm: &FarmConfig, defaults: &PageDefaults) -> Result<Vec<SubsystemConfig>> {
    // ---
    let ration = calibrated("ration", farm.ration_bounds(), DEFAULT_RATION_BOUNDS);
    let temperature = calibrated("temperature", farm.temperature_bounds(), DEFAULT_TEMPERATURE_BOUNDS);

    Ok(vec![
        water(defaults),
        food(ration, defaults)?,
        fan(temperature, defaults)?,
        light(DEFAULT_LUMINOSITY_BOUNDS, defaults)?,
    ])
}

fn calibrated(name: &str, bounds: Option<Bounds>, fallback: Bounds) -> Bounds {
    match bounds.map(|b| b.validate().map(|()| b)) {
        Some(Ok(bounds)) => bounds,
        Some(Err(e)) => {
            warn!("Ignoring backend {} range: {}", name, e);
            fallback
        }
        None => fallback,
    }
}

/// Look up the page of `subsystem`.
pub fn find(configs: &[SubsystemConfig], subsystem: Subsystem) -> Option<&SubsystemConfig> {
    configs.iter().find(|c| c.subsystem == subsystem)
}
