//! Pure data structures managed by the [`OfferStoreActor`](crate::offer_actor::OfferStoreActor).

pub mod offer;

pub use offer::*;
