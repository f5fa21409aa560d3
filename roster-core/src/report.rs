//! Text report generation.
//!
//! The report groups people by vehicle, in collection order, for pasting into a
//! chat or share sheet:
//!
//! ```text
//! מטרה: Eilat
//! תאריך: 2026-10-20
//! שעה: 06:00
//!
//! Jeep 12345
//! Dana Levi 1234567 - נשאר ללון
//! Noa Cohen 7654321 - חוזר
//!
//! Truck 67890
//! Avi Mizrahi 1112223 - חוזר
//! ```
//!
//! Assignments whose person no longer exists are skipped, and vehicles left
//! with nobody are omitted.

use crate::models::{AppData, Person};

pub const GOAL_LABEL: &str = "מטרה:";
pub const DATE_LABEL: &str = "תאריך:";
pub const TIME_LABEL: &str = "שעה:";

/// Shown for people staying overnight.
pub const STAY_LABEL: &str = "נשאר ללון";
/// Shown for people returning the same day.
pub const RETURN_LABEL: &str = "חוזר";

pub fn stay_label(stay: bool) -> &'static str {
    if stay {
        STAY_LABEL
    } else {
        RETURN_LABEL
    }
}

/// Generates the grouped report for `snapshot`.
///
/// Output is fully determined by collection order; nothing is sorted.
pub fn generate(snapshot: &AppData) -> String {
    let mut output = String::new();

    if let Some(info) = &snapshot.convoy_info {
        output.push_str(&format!("{} {}\n", GOAL_LABEL, info.goal));
        output.push_str(&format!("{} {}\n", DATE_LABEL, info.date));
        output.push_str(&format!("{} {}\n", TIME_LABEL, info.time));
        output.push('\n');
    }

    let groups: Vec<String> = snapshot
        .vehicles
        .iter()
        .filter_map(|vehicle| {
            let occupants = vehicle_occupants(snapshot, &vehicle.vehicle_id);
            if occupants.is_empty() {
                return None;
            }

            let mut lines = Vec::with_capacity(occupants.len() + 1);
            lines.push(format!("{} {}", vehicle.designation, vehicle.vehicle_id));
            for (person, stay) in occupants {
                lines.push(format!(
                    "{} {} - {}",
                    person.full_name,
                    person.id_number,
                    stay_label(stay)
                ));
            }
            Some(lines.join("\n"))
        })
        .collect();

    output.push_str(&groups.join("\n\n"));
    output
}

/// People assigned to `vehicle_id`, in the order they were assigned, with their
/// stay flag. Assignments pointing at a missing person are dropped.
pub fn vehicle_occupants<'a>(
    snapshot: &'a AppData,
    vehicle_id: &str,
) -> Vec<(&'a Person, bool)> {
    snapshot
        .assignments
        .iter()
        .filter(|a| a.vehicle_id == vehicle_id)
        .filter_map(|a| snapshot.find_person(&a.person_id).map(|p| (p, a.stay)))
        .collect()
}

/// People not seated in any existing vehicle, in collection order.
pub fn unassigned_people(snapshot: &AppData) -> Vec<&Person> {
    snapshot
        .people
        .iter()
        .filter(|p| {
            !snapshot.assignments.iter().any(|a| {
                a.person_id == p.id_number && snapshot.find_vehicle(&a.vehicle_id).is_some()
            })
        })
        .collect()
}
