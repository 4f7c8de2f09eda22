//! REST client for the farm backend.
//!
//! The backend is lenient about shapes: lists come back bare, wrapped in a
//! `value` array, or as a single object. Every item is parsed on its own and
//! items that do not parse are logged and skipped, so one bad row never
//! blanks a whole page.

use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use farmwatch::{
    ActionRecord, CommandRequest, DeviceStatus, FarmConfig, NewAction, Reading, Subsystem, SwitchState,
};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

// ---

/// Explicit credential handed to the backend client.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Action as the backend stores it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    // ---
    pub id: Value,
    pub system: String,
    pub action: String,
    pub quantity: Option<f64>,
    pub created_at: Option<String>,
    pub user: Option<RawActionUser>,
}

#[derive(Debug, Deserialize)]
pub struct RawActionUser {
    pub name: Option<String>,
}

impl RawAction {
    // ---
    /// `None` for actions of a subsystem the dashboard does not know.
    pub fn to_record(&self) -> Option<ActionRecord> {
        // ---
        let subsystem: Subsystem = match self.system.parse() {
            Ok(subsystem) => subsystem,
            Err(e) => {
                debug!("Skipping action {}: {}", self.id, e);
                return None;
            }
        };

        let id = id_text(&self.id);

        let timestamp = self.created_at.as_deref().and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| debug!("Action {} has unreadable timestamp '{}': {}", id, raw, e))
                .ok()
        });

        Some(ActionRecord {
            id,
            subsystem,
            actor_name: self.user.as_ref().and_then(|u| u.name.clone()),
            operation: self.action.clone(),
            quantity: self.quantity,
            timestamp,
        })
    }
}

/// Device as the backend stores it.
#[derive(Debug, Deserialize)]
pub struct RawDevice {
    pub id: Value,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: String,
}

impl RawDevice {
    pub fn to_status(&self) -> DeviceStatus {
        DeviceStatus::new(
            id_text(&self.id),
            self.name.clone(),
            &self.device_type,
            SwitchState::from_status(&self.status),
        )
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Backend reply to a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub message: String,
}

/// Client for the farm backend.
#[derive(Debug, Clone)]
pub struct FarmBackend {
    // ---
    client: Client,
    base_url: String,
    credential: Option<Credential>,
}

impl FarmBackend {
    // ---
    pub fn new(base_url: impl Into<String>, credential: Option<Credential>) -> Result<Self> {
        // ---
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            credential,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Some(Credential(token)) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        // ---
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {} {:?}", url, query);

        let response = self
            .authorize(self.client.get(&url).query(query))
            .send()
            .await
            .map_err(|e| anyhow!("Request to '{}' failed: {}", url, e))?
            .error_for_status()
            .map_err(|e| anyhow!("Backend rejected '{}': {}", url, e))?;

        Ok(response.json().await?)
    }

    /// Latest `limit` readings, oldest-first.
    pub async fn reading_history(&self, limit: usize) -> Result<Vec<Reading>> {
        // ---
        let body = self
            .get_json("/sensors", &[("limit", limit.to_string()), ("skip", "0".into())])
            .await?;

        // The backend answers newest-first; charts want oldest-first.
        let mut readings: Vec<Reading> = parse_items(body, "reading");
        readings.reverse();

        info!("Fetched {} readings", readings.len());
        Ok(readings)
    }

    /// Latest `limit` actions, newest-first, optionally for one subsystem.
    pub async fn actions(&self, subsystem: Option<Subsystem>, limit: usize) -> Result<Vec<ActionRecord>> {
        // ---
        let mut query = vec![("limit", limit.to_string()), ("skip", "0".to_string())];
        if let Some(subsystem) = subsystem {
            query.push(("system", subsystem.as_str().to_string()));
        }

        let body = self.get_json("/actions", &query).await?;
        let records: Vec<ActionRecord> = parse_items::<RawAction>(body, "action")
            .iter()
            .filter_map(RawAction::to_record)
            .collect();

        info!("Fetched {} actions", records.len());
        Ok(records)
    }

    pub async fn devices(&self) -> Result<Vec<DeviceStatus>> {
        // ---
        let body = self.get_json("/devices", &[]).await?;
        let devices: Vec<DeviceStatus> = parse_items::<RawDevice>(body, "device")
            .iter()
            .map(RawDevice::to_status)
            .collect();

        info!("Fetched {} devices", devices.len());
        Ok(devices)
    }

    pub async fn farm_config(&self) -> Result<FarmConfig> {
        // ---
        let body = self.get_json("/config", &[]).await?;
        serde_json::from_value(body).map_err(|e| anyhow!("Unreadable farm config: {}", e))
    }

    pub async fn send_command(&self, command: &CommandRequest) -> Result<CommandResponse> {
        // ---
        let url = format!("{}/commands", self.base_url);
        info!(
            "Sending {:?} {:?} for user {}",
            command.actuator, command.state, command.user_id
        );

        let response = self
            .authorize(self.client.post(&url).json(command))
            .send()
            .await
            .map_err(|e| anyhow!("Request to '{}' failed: {}", url, e))?
            .error_for_status()
            .map_err(|e| anyhow!("Backend rejected command: {}", e))?;

        Ok(response.json().await?)
    }

    /// Log an action. Returns the stored record when the backend echoes one
    /// back in a shape the dashboard can read.
    pub async fn create_action(&self, action: &NewAction) -> Result<Option<ActionRecord>> {
        // ---
        let url = format!("{}/actions", self.base_url);
        debug!("Recording action '{}' on {}", action.action, action.system);

        let response = self
            .authorize(self.client.post(&url).json(action))
            .send()
            .await
            .map_err(|e| anyhow!("Request to '{}' failed: {}", url, e))?
            .error_for_status()
            .map_err(|e| anyhow!("Backend rejected action: {}", e))?;

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let record = parse_items::<RawAction>(body, "action")
            .first()
            .and_then(RawAction::to_record);
        Ok(record)
    }
}

/// Parse every item of a list-ish response, skipping the ones that fail.
fn parse_items<T: DeserializeOwned>(body: Value, kind: &str) -> Vec<T> {
    // ---
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("value") {
            Some(Value::Array(items)) => items,
            _ => vec![Value::Object(map)],
        },
        Value::Null => Vec::new(),
        other => vec![other],
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Failed to parse {} {}: {} - Raw item: {}", kind, i, e, item);
                None
            }
        })
        .collect()
}
