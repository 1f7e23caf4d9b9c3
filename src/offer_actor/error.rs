//! Error types for the offer store actor.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that can occur while talking to the offer store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OfferError {
    /// The actor has stopped and no longer accepts commands.
    #[error("Offer store closed")]
    ActorClosed,

    /// The actor dropped the reply channel without answering.
    #[error("Offer store dropped response channel")]
    ActorDropped,

    /// The command addressed a slot outside the active set.
    #[error("Offer index {index} out of range for {len} offers")]
    IndexOutOfRange { index: usize, len: usize },
}

impl IntoResponse for OfferError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
