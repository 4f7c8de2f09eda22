//! Status classifier: percentage (or float switch) to label and severity.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelemetryError};

// ---

/// Coarse status tier, independent of the label text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Attention,
    Normal,
    High,
}

impl Severity {
    /// Both ends of the scale call for an operator.
    pub fn is_alert(&self) -> bool {
        matches!(self, Severity::Low | Severity::High)
    }
}

/// A classified status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub label: String,
    pub severity: Severity,
}

impl Status {
    pub fn new(label: impl Into<String>, severity: Severity) -> Self {
        Self {
            label: label.into(),
            severity,
        }
    }
}

/// One bucket of a [`StatusScale`]: everything up to `ceiling` percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub ceiling: f64,
    pub label: String,
    pub severity: Severity,
}

impl Threshold {
    pub fn new(ceiling: f64, label: impl Into<String>, severity: Severity) -> Self {
        Self {
            ceiling,
            label: label.into(),
            severity,
        }
    }
}

/// Threshold table evaluated low-to-high.
///
/// Invariant: non-empty with strictly increasing ceilings. The last entry
/// covers everything above the previous ceiling, up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Threshold>", into = "Vec<Threshold>")]
pub struct StatusScale(Vec<Threshold>);

impl StatusScale {
    // ---
    pub fn new(thresholds: Vec<Threshold>) -> Result<Self> {
        // ---
        if thresholds.is_empty() {
            return Err(TelemetryError::InvalidThresholds(
                "at least one threshold is required".into(),
            ));
        }
        if let Some(bad) = thresholds.iter().find(|t| !t.ceiling.is_finite()) {
            return Err(TelemetryError::InvalidThresholds(format!(
                "ceiling of '{}' is not finite",
                bad.label
            )));
        }
        if let Some(pair) = thresholds.windows(2).find(|w| w[0].ceiling >= w[1].ceiling) {
            return Err(TelemetryError::InvalidThresholds(format!(
                "ceiling {} ('{}') must be below {} ('{}')",
                pair[0].ceiling, pair[0].label, pair[1].ceiling, pair[1].label
            )));
        }
        Ok(Self(thresholds))
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.0
    }
}

impl TryFrom<Vec<Threshold>> for StatusScale {
    type Error = TelemetryError;

    fn try_from(thresholds: Vec<Threshold>) -> Result<Self> {
        Self::new(thresholds)
    }
}

impl From<StatusScale> for Vec<Threshold> {
    fn from(scale: StatusScale) -> Self {
        scale.0
    }
}

/// Labels for a boolean sensor, which carries no magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchLabels {
    pub on: Status,
    pub off: Status,
}

impl Default for SwitchLabels {
    fn default() -> Self {
        Self {
            on: Status::new("Normal", Severity::Normal),
            off: Status::new("Low", Severity::Low),
        }
    }
}

/// Classify a percentage: the first bucket whose ceiling is at or above it,
/// or the highest bucket when nothing matches.
pub fn classify(percentage: f64, scale: &StatusScale) -> Status {
    // ---
    let thresholds = scale.thresholds();
    let hit = thresholds
        .iter()
        .find(|t| t.ceiling >= percentage)
        .unwrap_or_else(|| &thresholds[thresholds.len() - 1]);

    Status::new(hit.label.clone(), hit.severity)
}

/// Classify a float switch reading.
pub fn classify_boolean(value: bool, labels: &SwitchLabels) -> Status {
    if value {
        labels.on.clone()
    } else {
        labels.off.clone()
    }
}
