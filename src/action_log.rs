//! Action log formatter: action records to table rows.

use serde::{Deserialize, Serialize};

use crate::models::{ActionRecord, Subsystem};
use crate::time_format::{time_text, TimeFormat};

// ---

/// Shown instead of a quantity when the action carries none.
pub const QUANTITY_PLACEHOLDER: &str = "—";

/// Filtering and display options for [`format_log`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogOptions {
    /// Keep only this subsystem; `None` keeps everything.
    pub subsystem: Option<Subsystem>,
    pub limit: usize,
    /// Actor shown for unattributed (automated) actions.
    pub actor_fallback: String,
}

/// A render-ready action table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRow {
    pub id: String,
    pub subsystem: Subsystem,
    pub actor: String,
    pub operation: String,
    pub quantity_text: String,
    pub time_text: String,
}

/// Format `actions`, which must already be newest-first.
///
/// Records of other subsystems are dropped before truncating to
/// `opts.limit`, so a page always gets up to `limit` of its own rows.
pub fn format_log(
    actions: &[ActionRecord],
    opts: &LogOptions,
    format: &dyn TimeFormat,
) -> Vec<LogRow> {
    // ---
    actions
        .iter()
        .filter(|a| opts.subsystem.map_or(true, |s| a.subsystem == s))
        .take(opts.limit)
        .map(|a| LogRow {
            id: a.id.clone(),
            subsystem: a.subsystem,
            actor: actor_text(a.actor_name.as_deref(), &opts.actor_fallback),
            operation: a.operation.clone(),
            quantity_text: quantity_text(a.quantity, a.subsystem),
            time_text: time_text(format, a.timestamp),
        })
        .collect()
}

fn actor_text(name: Option<&str>, fallback: &str) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

/// Quantity with the subsystem's unit suffix; a zero quantity still renders
/// as a number, only an absent one becomes the placeholder.
pub fn quantity_text(quantity: Option<f64>, subsystem: Subsystem) -> String {
    match quantity {
        Some(q) if q.is_finite() => format!("{}{}", q, subsystem.quantity_unit()),
        _ => QUANTITY_PLACEHOLDER.to_string(),
    }
}
