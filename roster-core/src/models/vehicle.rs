use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Allowed number of digits in a vehicle id.
pub const VEHICLE_ID_LEN: RangeInclusive<usize> = 5..=9;

/// A vehicle in the convoy.
///
/// Same lifecycle as [`Person`](super::Person): added and removed, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique key, 5 to 9 ASCII digits.
    pub vehicle_id: String,
    /// Human label shown in the report (e.g. "Jeep").
    pub designation: String,
}

impl Vehicle {
    pub fn new(vehicle_id: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            designation: designation.into(),
        }
    }
}

/// Returns true if `s` is a well-formed vehicle id.
pub fn is_valid_vehicle_id(s: &str) -> bool {
    VEHICLE_ID_LEN.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}
