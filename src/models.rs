//! Data models shared by every telemetry component.
//!
//! Shapes mirror what the farm backend returns once deserialized; the module
//! only ever borrows these values and derives new ones from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TelemetryError};

// ---

/// One timestamped snapshot of every farm sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    // ---
    #[serde(rename = "createdAt", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Lux or percent, depending on the LDR calibration.
    pub luminosity: f64,
    /// Grams left in the feeder.
    pub ration_weight: f64,
    /// Float switch: `true` while the water is above the switch.
    pub water_level: bool,
}

/// Calibration range used to turn a raw value into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    // ---
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Reject inverted, empty or non-finite ranges.
    pub fn validate(&self) -> Result<()> {
        // ---
        // `!(a < b)` also catches NaN on either side
        if !(self.min < self.max) || !self.min.is_finite() || !self.max.is_finite() {
            return Err(TelemetryError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One controllable domain of the farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    // ---
    #[serde(alias = "pump")]
    Water,
    #[serde(alias = "feeder")]
    Food,
    #[serde(alias = "luminosity", alias = "lighting")]
    Light,
    #[serde(alias = "temperature")]
    Fan,
}

impl Subsystem {
    // ---
    pub const ALL: [Subsystem; 4] = [
        Subsystem::Water,
        Subsystem::Food,
        Subsystem::Light,
        Subsystem::Fan,
    ];

    /// Wire name, as used in backend query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subsystem::Water => "water",
            Subsystem::Food => "food",
            Subsystem::Light => "light",
            Subsystem::Fan => "fan",
        }
    }

    /// Title shown on dashboard cards.
    pub fn title(&self) -> &'static str {
        match self {
            Subsystem::Water => "Água",
            Subsystem::Food => "Alimentação",
            Subsystem::Light => "Luminosidade",
            Subsystem::Fan => "Temperatura",
        }
    }

    /// Canonical suffix for action quantities.
    pub fn quantity_unit(&self) -> &'static str {
        match self {
            Subsystem::Water => "ml",
            Subsystem::Food => "g",
            Subsystem::Light => "%",
            Subsystem::Fan => "",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a subsystem name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subsystem '{0}'")]
pub struct UnknownSubsystem(pub String);

impl FromStr for Subsystem {
    type Err = UnknownSubsystem;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // ---
        match s {
            "water" | "pump" => Ok(Subsystem::Water),
            "food" | "feeder" => Ok(Subsystem::Food),
            "light" | "luminosity" | "lighting" => Ok(Subsystem::Light),
            "fan" | "temperature" => Ok(Subsystem::Fan),
            other => Err(UnknownSubsystem(other.to_string())),
        }
    }
}

/// A logged operation performed by a user or by the automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    // ---
    pub id: String,
    pub subsystem: Subsystem,
    /// Weak reference to the actor, by name only.
    pub actor_name: Option<String>,
    pub operation: String,
    pub quantity: Option<f64>,
    /// `None` when the backend sent no timestamp or one that did not parse.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Selects one measured quantity out of a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // ---
    Temperature,
    Humidity,
    Luminosity,
    RationWeight,
    WaterLevel,
}

impl Field {
    // ---
    /// Numeric value of the field; the float switch reads as `1.0` / `0.0`.
    pub fn value(self, reading: &Reading) -> f64 {
        match self {
            Field::Temperature => reading.temperature,
            Field::Humidity => reading.humidity,
            Field::Luminosity => reading.luminosity,
            Field::RationWeight => reading.ration_weight,
            Field::WaterLevel => {
                if reading.water_level {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Luminosity => "luminosity",
            Field::RationWeight => "rationWeight",
            Field::WaterLevel => "waterLevel",
        }
    }

    /// Display suffix for raw values.
    pub fn unit(self) -> &'static str {
        match self {
            Field::Temperature => "°C",
            Field::Humidity | Field::Luminosity => "%",
            Field::RationWeight => "g",
            Field::WaterLevel => "",
        }
    }
}

/// Whether the farm is driven by the automation or by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    Auto,
    Manual,
}

impl OperationMode {
    pub fn label(&self) -> &'static str {
        match self {
            OperationMode::Auto => "Automático",
            OperationMode::Manual => "Manual",
        }
    }
}

/// Temperature calibration from the backend configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Feeder calibration from the backend configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RationRange {
    pub min_weight: f64,
    pub max_weight: f64,
}

/// Light schedule from the backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSchedule {
    pub control: Option<String>,
    pub ldr_threshold: Option<f64>,
    pub on_time: Option<String>,
    pub off_time: Option<String>,
}

/// The backend's farm configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmConfig {
    // ---
    pub mode: OperationMode,
    #[serde(default)]
    pub light: Option<LightSchedule>,
    #[serde(default)]
    pub temperature: Option<TemperatureRange>,
    #[serde(default)]
    pub ration: Option<RationRange>,
    /// Seconds between persisted sensor readings.
    #[serde(default)]
    pub save_interval: Option<u32>,
}

impl FarmConfig {
    // ---
    pub fn ration_bounds(&self) -> Option<Bounds> {
        self.ration.map(|r| Bounds::new(r.min_weight, r.max_weight))
    }

    pub fn temperature_bounds(&self) -> Option<Bounds> {
        self.temperature.map(|t| Bounds::new(t.min, t.max))
    }
}
