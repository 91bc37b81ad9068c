#![deny(unreachable_pub)]

// Core modules
mod consts;
mod errors;
mod prelude;
mod req;

// Data model
pub mod metrics;
pub mod types;

// Feature modules
pub mod aggregate;
pub mod config;
pub mod pipeline;
pub mod population;
pub mod registry;
pub mod report;
pub mod tracking;

// Re-exports
pub use aggregate::{build_aggregate, extrapolations, Extrapolation, EXTRAPOLATED_COUNTS};
pub use config::{AppConfig, LogFormat, LoggingConfig, ReportFormat};
pub use consts::{
    AGGREGATE_CODE, DEFAULT_API_URL, DEFAULT_CONFIG_PATH, DEFAULT_POPULATIONS_PATH,
    DEFAULT_TIMEOUT_SECS, STATES_DAILY_PATH,
};
pub use errors::{Error, HttpErrorKind};
pub use population::{load_populations, load_populations_file};
pub use registry::Registry;
pub use report::{Report, ReportRow};
pub use tracking::client::TrackingClient;
pub use tracking::response_structs::DailyRecord;
pub use types::*;
