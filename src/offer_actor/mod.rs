//! # Offer Store Actor
//!
//! The single-writer core of the service. One [`OfferStoreActor`] owns the fixed-size
//! active set and the retired history; everything else reaches them through
//! [`OfferCommand`]s sent by an [`OfferClient`](crate::clients::OfferClient).
//!
//! ## Structure
//!
//! - [`actor`] - the command loop and the state it owns
//! - [`message`] - [`OfferCommand`] and the [`OfferSnapshot`] returned by `GetAll`
//! - [`error`] - [`OfferError`]
//! - [`mock`] - channel-level test doubles
//! - [`new()`] - factory that builds the actor from a [`ServiceConfig`]
//!
//! ## Usage
//!
//! ```rust
//! use offer_rotator::config::ServiceConfig;
//! use offer_rotator::offer_actor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServiceConfig { offer_count: 3, ..ServiceConfig::default() };
//!     let (actor, client) = offer_actor::new(&config);
//!     let handle = tokio::spawn(actor.run());
//!
//!     let offer = client.increment_at(0).await.unwrap();
//!     assert_eq!(offer.views, 1);
//!
//!     client.stop().await.unwrap();
//!     handle.await.unwrap();
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::*;
pub use error::*;
pub use message::*;

use crate::clients::OfferClient;
use crate::config::ServiceConfig;

/// Creates a new offer store actor and its client.
pub fn new(config: &ServiceConfig) -> (OfferStoreActor, OfferClient) {
    OfferStoreActor::new(config.command_buffer, config.offer_count, config.payload_len)
}
