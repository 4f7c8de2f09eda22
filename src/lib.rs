//! Telemetry status and history module for the farm monitoring dashboard.
//!
//! Pure, synchronous derivations shared by every dashboard page:
//! - [`normalize`] turns a raw reading into a 0–100 percentage
//! - [`classify`] buckets a percentage (or a float switch) into a status
//! - [`series`] builds chart points from the reading history
//! - [`action_log`] formats the command log into table rows
//! - [`facade`] composes all of the above into one page [`ViewModel`]
//! - [`overview`] builds the dashboard home page from every subsystem
//!
//! Nothing here performs I/O or keeps state between calls. Fetching, polling
//! and rendering belong to the caller; timestamps are formatted through an
//! injected [`TimeFormat`].

pub mod action_log;
pub mod classify;
pub mod command;
pub mod error;
pub mod facade;
pub mod models;
pub mod normalize;
pub mod overview;
pub mod profiles;
pub mod series;
pub mod time_format;

pub use action_log::{format_log, LogOptions, LogRow};
pub use classify::{classify, classify_boolean, Severity, Status, StatusScale, SwitchLabels, Threshold};
pub use command::{Actuator, CommandRequest, DeviceStatus, NewAction, SwitchState};
pub use error::{Result, TelemetryError};
pub use facade::{build_view_model, Gauge, SubsystemConfig, ValueScale, ViewModel};
pub use models::{ActionRecord, Bounds, FarmConfig, Field, OperationMode, Reading, Subsystem};
pub use normalize::normalize;
pub use overview::{build_overview, Overview};
pub use series::{build_series, SeriesPoint};
pub use time_format::{ClockFormat, TimeFormat};
