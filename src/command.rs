//! Actuator commands, device states and the action records a manual
//! command leaves behind.

use serde::{Deserialize, Serialize};

use crate::models::Subsystem;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actuator {
    Fan,
    Light,
    Pump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(&self) -> bool {
        matches!(self, SwitchState::On)
    }

    /// Device status as the backend reports it; anything but `on` is off.
    pub fn from_status(status: &str) -> Self {
        if status.trim().eq_ignore_ascii_case("on") {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }
}

impl Actuator {
    // ---
    pub fn subsystem(&self) -> Subsystem {
        match self {
            Actuator::Fan => Subsystem::Fan,
            Actuator::Light => Subsystem::Light,
            Actuator::Pump => Subsystem::Water,
        }
    }

    /// Actuator behind a backend device type (`lamp`, `fan`, `pump`).
    pub fn from_device_type(device_type: &str) -> Option<Self> {
        match device_type.trim().to_ascii_lowercase().as_str() {
            "lamp" | "light" => Some(Actuator::Light),
            "fan" => Some(Actuator::Fan),
            "pump" => Some(Actuator::Pump),
            _ => None,
        }
    }

    /// Label of the device state as shown next to its toggle.
    pub fn state_label(&self, state: SwitchState) -> &'static str {
        match (self, state.is_on()) {
            (Actuator::Light, true) => "Acesa",
            (Actuator::Light, false) => "Apagada",
            (Actuator::Pump, true) => "Ativo",
            (Actuator::Pump, false) => "Inativo",
            (Actuator::Fan, true) => "Ligado",
            (Actuator::Fan, false) => "Desligado",
        }
    }
}

/// Body of a command sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub actuator: Actuator,
    pub state: SwitchState,
    pub user_id: String,
}

impl CommandRequest {
    /// Action record logged once the backend accepted this command.
    pub fn to_action(&self) -> NewAction {
        NewAction {
            user_id: self.user_id.clone(),
            system: self.actuator.subsystem(),
            action: format!("Acionamento manual: {}", self.actuator.state_label(self.state)),
            quantity: None,
        }
    }
}

/// Body of a new action record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAction {
    pub user_id: String,
    pub system: Subsystem,
    pub action: String,
    pub quantity: Option<f64>,
}

/// A device with its switch state and toggle label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub id: String,
    pub name: String,
    pub actuator: Option<Actuator>,
    pub state: SwitchState,
    pub state_label: String,
}

impl DeviceStatus {
    // ---
    /// Devices of an unknown type are labelled like a fan.
    pub fn new(id: impl Into<String>, name: impl Into<String>, device_type: &str, state: SwitchState) -> Self {
        // ---
        let actuator = Actuator::from_device_type(device_type);
        let state_label = actuator.unwrap_or(Actuator::Fan).state_label(state);

        Self {
            id: id.into(),
            name: name.into(),
            actuator,
            state,
            state_label: state_label.to_string(),
        }
    }
}
