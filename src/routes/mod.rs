use axum::Router;

use crate::state::AppState;

pub mod appointments;
pub mod auth;
pub mod cart;
pub mod complaints;
pub mod doc;
pub mod feedback;
pub mod health;
pub mod orders;
pub mod params;
pub mod payment_methods;
pub mod profile;
pub mod shops;
pub mod tools;
pub mod tutorials;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/shops", shops::router())
        .nest("/tools", tools::router())
        .nest("/tutorials", tutorials::router())
        .nest("/appointments", appointments::router())
        .nest("/complaints", complaints::router())
        .nest("/feedback", feedback::router())
        .nest("/payment-methods", payment_methods::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
}
