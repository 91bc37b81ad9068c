use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{prelude::*, types::Snapshot, Error};

/// One element of the `/api/states/daily` array.
///
/// Counts are `null` (or absent) until a state starts reporting them.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub state: String,
    pub date_checked: String,
    #[serde(default)]
    pub positive: Option<u64>,
    #[serde(default)]
    pub negative: Option<u64>,
    #[serde(default)]
    pub pending: Option<u64>,
    #[serde(default)]
    pub hospitalized: Option<u64>,
    #[serde(default)]
    pub death: Option<u64>,
}

impl DailyRecord {
    /// `dateChecked` as a naive UTC timestamp, with the trailing `Z` dropped.
    pub fn checked_at(&self) -> Result<NaiveDateTime> {
        let raw = self.date_checked.trim();
        let local = raw.strip_suffix('Z').unwrap_or(raw);
        local
            .parse::<NaiveDateTime>()
            .map_err(|e| Error::InvalidTimestamp {
                state: self.state.clone(),
                value: self.date_checked.clone(),
                message: e.to_string(),
            })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.positive.unwrap_or_default(),
            self.negative.unwrap_or_default(),
            self.pending.unwrap_or_default(),
            self.hospitalized.unwrap_or_default(),
            self.death.unwrap_or_default(),
        )
    }
}
