//! Rocket JSON API exposing the TECHNOBOT chat engine.

pub mod probe;
pub mod routes;
pub mod state;

pub use probe::probe_port;
pub use state::AppState;

use rocket::{Build, Rocket, routes};

/// Assemble the rocket instance over a prepared application state.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build().manage(state).mount(
        "/api",
        routes![
            routes::health,
            routes::list_customers,
            routes::get_customer,
            routes::create_session,
            routes::list_sessions,
            routes::get_session,
            routes::delete_session,
            routes::post_message,
            routes::confirm_transfer,
            routes::cancel_transfer,
            routes::product_interest,
            routes::extract_transfer,
            routes::explain_customer,
        ],
    )
}
