//! # Command Protocol
//!
//! The messages sent by [`OfferClient`](crate::clients::OfferClient) to the
//! [`OfferStoreActor`](super::OfferStoreActor).
//!
//! Commands that expect an answer carry a one-shot reply handle. Fire-and-forget
//! commands (`SetAt`, `Stop`) carry none, so a reply handle on them cannot be built.

use super::error::OfferError;
use crate::model::Offer;
use serde::Serialize;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, OfferError>>;

#[derive(Debug)]
pub enum OfferCommand {
    /// Read every current offer, active first, then retired.
    GetAll { respond_to: Response<OfferSnapshot> },
    /// Replace the occupant of `index`, retiring it first if it was viewed.
    SetAt { index: usize, offer: Offer },
    /// Count one view of the occupant of `index` and return its new state.
    IncrementAt {
        index: usize,
        respond_to: Response<Offer>,
    },
    /// Terminate the actor loop.
    Stop,
}

/// Consistent copy of the store, taken while no other command could run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfferSnapshot {
    /// The active set in slot order.
    pub active: Vec<Offer>,
    /// Retired offers in the order they were evicted.
    pub retired: Vec<Offer>,
}

impl OfferSnapshot {
    /// All offers, active set first, then retired ones.
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.active.iter().chain(self.retired.iter())
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.retired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the view counters of every offer, active or retired.
    pub fn total_views(&self) -> u64 {
        self.iter().map(|offer| offer.views).sum()
    }
}
