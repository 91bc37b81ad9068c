/// Public COVID Tracking Project API host.
pub const DEFAULT_API_URL: &str = "https://covidtracking.com";

/// Daily per-state history endpoint, relative to the API host.
pub const STATES_DAILY_PATH: &str = "/api/states/daily";

pub const DEFAULT_POPULATIONS_PATH: &str = "populations.csv";

pub const DEFAULT_CONFIG_PATH: &str = "covid_report.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Registry key of the synthetic nationwide entry.
pub const AGGREGATE_CODE: &str = "ΣΣ";
