//! Convoy roster service: HTTP API and configuration on top of `roster_core`.

pub mod api;
pub mod config;

pub use roster_core::{db, models, report, store, transfer, RosterStore};
