use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::models::*;
use crate::report;
use crate::store::RosterStore;
use crate::transfer::EXPORT_FILE_NAME;

// ============================================================
// Error Handling
// ============================================================

/// Reject a request with a message the client can show.
fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    let msg = msg.into();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Snapshot
// ============================================================

pub async fn get_snapshot(State(store): State<RosterStore>) -> Json<AppData> {
    Json(store.export_snapshot())
}

pub async fn clear_roster(State(store): State<RosterStore>) -> StatusCode {
    store.clear_all();
    StatusCode::NO_CONTENT
}

// ============================================================
// People
// ============================================================

pub async fn add_person(
    State(store): State<RosterStore>,
    Json(person): Json<Person>,
) -> Result<(StatusCode, Json<Person>), (StatusCode, String)> {
    if !is_valid_id_number(&person.id_number) {
        return Err(bad_request(format!(
            "ID number must be exactly {} digits",
            ID_NUMBER_LEN
        )));
    }
    if !store.add_person_if_absent(person.clone()) {
        return Err((
            StatusCode::CONFLICT,
            format!("Person {} already exists", person.id_number),
        ));
    }

    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn remove_person(
    State(store): State<RosterStore>,
    Path(id): Path<String>,
) -> StatusCode {
    store.remove_person(&id);
    StatusCode::NO_CONTENT
}

pub async fn list_unassigned_people(State(store): State<RosterStore>) -> Json<Vec<Person>> {
    let snapshot = store.snapshot();
    Json(
        report::unassigned_people(&snapshot)
            .into_iter()
            .cloned()
            .collect(),
    )
}

// ============================================================
// Vehicles
// ============================================================

pub async fn add_vehicle(
    State(store): State<RosterStore>,
    Json(vehicle): Json<Vehicle>,
) -> Result<(StatusCode, Json<Vehicle>), (StatusCode, String)> {
    if !is_valid_vehicle_id(&vehicle.vehicle_id) {
        return Err(bad_request(format!(
            "Vehicle ID must be {} to {} digits",
            VEHICLE_ID_LEN.start(),
            VEHICLE_ID_LEN.end()
        )));
    }
    if !store.add_vehicle_if_absent(vehicle.clone()) {
        return Err((
            StatusCode::CONFLICT,
            format!("Vehicle {} already exists", vehicle.vehicle_id),
        ));
    }

    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn remove_vehicle(
    State(store): State<RosterStore>,
    Path(id): Path<String>,
) -> StatusCode {
    store.remove_vehicle(&id);
    StatusCode::NO_CONTENT
}

// ============================================================
// Assignments
// ============================================================

pub async fn add_assignment(
    State(store): State<RosterStore>,
    Json(assignment): Json<Assignment>,
) -> Result<Json<Vec<Assignment>>, (StatusCode, String)> {
    if !is_valid_vehicle_id(&assignment.vehicle_id) {
        return Err(bad_request("Invalid vehicle ID"));
    }
    if !is_valid_id_number(&assignment.person_id) {
        return Err(bad_request("Invalid person ID"));
    }

    store.add_assignment(assignment);
    Ok(Json(store.snapshot().assignments.clone()))
}

pub async fn remove_assignment(
    State(store): State<RosterStore>,
    Path((vehicle_id, person_id)): Path<(String, String)>,
) -> StatusCode {
    store.remove_assignment(&vehicle_id, &person_id);
    StatusCode::NO_CONTENT
}

/// Clears assignments together with the convoy info.
pub async fn clear_assignments(State(store): State<RosterStore>) -> StatusCode {
    store.clear_assignments();
    StatusCode::NO_CONTENT
}

// ============================================================
// Convoy
// ============================================================

pub async fn set_convoy_info(
    State(store): State<RosterStore>,
    Json(info): Json<ConvoyInfo>,
) -> Json<ConvoyInfo> {
    store.set_convoy_info(info.clone());
    Json(info)
}

// ============================================================
// Report and transfer
// ============================================================

pub async fn get_report(State(store): State<RosterStore>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report::generate(&store.snapshot()),
    )
}

pub async fn export_roster(
    State(store): State<RosterStore>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let body = store.export_json().map_err(internal_error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}

/// Replaces the roster with the posted JSON document.
pub async fn import_roster(
    State(store): State<RosterStore>,
    body: String,
) -> Result<StatusCode, (StatusCode, String)> {
    store
        .import_json(&body)
        .map_err(|e| bad_request(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
