//! Core of the convoy roster: models, blob persistence, the roster store and
//! report generation.

pub mod db;
pub mod models;
pub mod report;
pub mod store;
pub mod transfer;

pub use store::{RosterStore, STORAGE_KEY};
