//! Type-safe wrapper around the offer store's command queue.

pub mod offer_client;

pub use offer_client::*;
