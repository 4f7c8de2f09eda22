//! Dashboard overview: one status card per subsystem, alerts, and the latest
//! actions across the whole farm.

use serde::{Deserialize, Serialize};

use crate::action_log::{format_log, LogOptions, LogRow};
use crate::classify::Severity;
use crate::error::Result;
use crate::facade::{build_view_model, SubsystemConfig};
use crate::models::{ActionRecord, OperationMode, Reading, Subsystem};
use crate::time_format::TimeFormat;

// ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCard {
    pub subsystem: Subsystem,
    pub title: String,
    pub display_text: String,
    pub status_label: String,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub subsystem: Subsystem,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub mode: Option<OperationMode>,
    pub cards: Vec<StatusCard>,
    pub alerts: Vec<Alert>,
    pub latest_actions: Vec<LogRow>,
}

impl Overview {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Build the dashboard home page from the current reading and the
/// newest-first action log.
///
/// Cards follow the order of `configs`. The action table is not filtered by
/// subsystem and shows as many rows as the most generous page.
pub fn build_overview(
    current: Option<&Reading>,
    actions: &[ActionRecord],
    configs: &[SubsystemConfig],
    mode: Option<OperationMode>,
    format: &dyn TimeFormat,
) -> Result<Overview> {
    // ---
    let mut cards = Vec::with_capacity(configs.len());
    let mut alerts = Vec::new();

    for config in configs {
        let view = build_view_model(current, &[], &[], config, format)?;
        let title = config.subsystem.title();

        if let Some(status) = view.status.as_ref().filter(|s| s.severity.is_alert()) {
            alerts.push(Alert {
                subsystem: config.subsystem,
                message: format!("{}: {}", title, status.label),
            });
        }

        cards.push(StatusCard {
            subsystem: config.subsystem,
            title: title.to_string(),
            status_label: view.status_label().to_string(),
            severity: view.severity(),
            display_text: view.display_text,
        });
    }

    let opts = LogOptions {
        subsystem: None,
        limit: configs.iter().map(|c| c.action_limit).max().unwrap_or(0),
        actor_fallback: configs
            .first()
            .map(|c| c.actor_fallback.clone())
            .unwrap_or_default(),
    };
    let latest_actions = format_log(actions, &opts, format);

    Ok(Overview {
        mode,
        cards,
        alerts,
        latest_actions,
    })
}
