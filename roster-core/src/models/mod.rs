//! Domain models for the convoy roster.
//!
//! # Core Concepts
//!
//! - [`Person`]: Someone travelling with the convoy, keyed by a 7-digit id number.
//! - [`Vehicle`]: A vehicle in the convoy, keyed by a 5 to 9 digit vehicle id.
//! - [`Assignment`]: Links one person to one vehicle and records whether they
//!   stay overnight. Identified by the `(vehicle_id, person_id)` pair.
//! - [`ConvoyInfo`]: Optional goal/date/time metadata for the whole convoy.
//! - [`AppData`]: The full snapshot. This is the unit of persistence and of
//!   import/export.
//!
//! Field names serialize in camelCase (`idNumber`, `fullName`, `vehicleId`, ...)
//! so persisted blobs and exported files keep a stable wire format.

mod assignment;
mod convoy;
mod person;
mod snapshot;
mod vehicle;

pub use assignment::*;
pub use convoy::*;
pub use person::*;
pub use snapshot::*;
pub use vehicle::*;
