//! Core value types: per-day snapshots and per-state entries.

mod snapshot;
mod state;

pub use snapshot::*;
pub use state::*;
