//! # HTTP Façade
//!
//! Translates HTTP calls into offer store commands:
//!
//! | Route | Command | Body |
//! |-------|---------|------|
//! | `GET /request` | `IncrementAt(random slot)` | payload of the served offer |
//! | `GET /admin/requests` | `GetAll` | one `"<payload>: <views>"` line per viewed offer |
//! | `GET /admin/offers` | `GetAll` | the whole snapshot as JSON |
//!
//! A failure to reach the store is answered with `500` and the error text.

pub mod handlers;

use crate::clients::OfferClient;
use crate::config::ServiceConfig;
use axum::routing::get;
use axum::Router;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: OfferClient,
    /// Size of the active set; served slots are drawn from `0..offer_count`.
    pub offer_count: usize,
}

impl AppState {
    pub fn new(client: OfferClient, config: &ServiceConfig) -> Self {
        Self {
            client,
            offer_count: config.offer_count,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/request", get(handlers::serve_offer))
        .route("/admin/requests", get(handlers::list_viewed_offers))
        .route("/admin/offers", get(handlers::snapshot_offers))
        .with_state(state)
}
