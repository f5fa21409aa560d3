mod handlers;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::store::RosterStore;

pub fn create_router(store: RosterStore) -> Router {
    create_router_with_config(store, &ServerConfig::disabled())
}

pub fn create_router_with_config(store: RosterStore, config: &ServerConfig) -> Router {
    let api = Router::new()
        // Snapshot
        .route("/snapshot", get(handlers::get_snapshot))
        .route("/roster", delete(handlers::clear_roster))
        // People
        .route("/people", post(handlers::add_person))
        .route("/people/unassigned", get(handlers::list_unassigned_people))
        .route("/people/{id}", delete(handlers::remove_person))
        // Vehicles
        .route("/vehicles", post(handlers::add_vehicle))
        .route("/vehicles/{id}", delete(handlers::remove_vehicle))
        // Assignments
        .route("/assignments", post(handlers::add_assignment))
        .route("/assignments", delete(handlers::clear_assignments))
        .route(
            "/assignments/{vehicle_id}/{person_id}",
            delete(handlers::remove_assignment),
        )
        // Convoy
        .route("/convoy", put(handlers::set_convoy_info))
        // Report and transfer
        .route("/report", get(handlers::get_report))
        .route("/export", get(handlers::export_roster))
        .route("/import", post(handlers::import_roster))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(store)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let Some(origins) = &config.cors_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
