use serde::{Deserialize, Serialize};

use super::{Assignment, ConvoyInfo, Person, Vehicle};

/// The complete roster at one instant.
///
/// Missing collections deserialize as empty and a missing `convoyInfo` as
/// absent, so partial documents are accepted on load and import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convoy_info: Option<ConvoyInfo>,
}

impl AppData {
    pub fn find_person(&self, id_number: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id_number == id_number)
    }

    pub fn find_vehicle(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vehicle_id == vehicle_id)
    }
}
