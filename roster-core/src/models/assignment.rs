use serde::{Deserialize, Serialize};

/// Places a person in a vehicle.
///
/// Identified by the `(vehicle_id, person_id)` pair; the store keeps at most one
/// assignment per pair. Neither id is checked against existing entities when the
/// assignment is written. Removing either endpoint deletes the assignment, and
/// report generation skips any that still dangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub vehicle_id: String,
    pub person_id: String,
    /// Whether the person stays overnight.
    pub stay: bool,
}

impl Assignment {
    pub fn new(vehicle_id: impl Into<String>, person_id: impl Into<String>, stay: bool) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            person_id: person_id.into(),
            stay,
        }
    }

    /// True if this assignment links the given vehicle and person.
    pub fn matches(&self, vehicle_id: &str, person_id: &str) -> bool {
        self.vehicle_id == vehicle_id && self.person_id == person_id
    }
}
