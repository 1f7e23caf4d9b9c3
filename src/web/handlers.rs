use super::AppState;
use crate::offer_actor::{OfferError, OfferSnapshot};
use axum::extract::State;
use axum::Json;
use rand::Rng;
use tracing::debug;

/// `GET /request`: counts a view of a random offer and returns its payload.
pub async fn serve_offer(State(state): State<AppState>) -> Result<String, OfferError> {
    let index = rand::thread_rng().gen_range(0..state.offer_count);
    let offer = state.client.increment_at(index).await?;
    debug!(index, views = offer.views, "Served offer");
    Ok(offer.payload)
}

/// `GET /admin/requests`: lists every offer that has been viewed at least once.
pub async fn list_viewed_offers(State(state): State<AppState>) -> Result<String, OfferError> {
    let snapshot = state.client.get_all().await?;
    Ok(render_viewed(&snapshot))
}

/// `GET /admin/offers`: every offer, viewed or not, split into active and retired.
pub async fn snapshot_offers(
    State(state): State<AppState>,
) -> Result<Json<OfferSnapshot>, OfferError> {
    Ok(Json(state.client.get_all().await?))
}

/// Renders viewed offers as `"<payload>: <views>"` lines in snapshot order, each
/// terminated by a newline. Unviewed offers are skipped.
pub fn render_viewed(snapshot: &OfferSnapshot) -> String {
    snapshot
        .iter()
        .filter(|offer| offer.is_viewed())
        .map(|offer| format!("{}: {}\n", offer.payload, offer.views))
        .collect()
}
