//! # Offer Rotator
//!
//! > **Random offers over HTTP, counted by a single-writer actor.**
//!
//! The service keeps a fixed-size set of short text offers. Every `GET /request` serves a
//! random one and counts the view; a background timer keeps replacing random slots with
//! fresh offers, and `GET /admin/requests` reports every offer that was ever viewed.
//!
//! ## Concurrency Model
//!
//! All offers live inside one [`OfferStoreActor`](offer_actor::OfferStoreActor) running in
//! its own Tokio task. HTTP handlers and the rotation trigger never touch the offers; they
//! send [`OfferCommand`](offer_actor::OfferCommand)s into the actor's queue and, when they
//! need an answer, wait on a one-shot reply. Commands are applied one at a time in the order
//! the queue delivers them, so no counter update is ever lost and no lock is needed.
//!
//! ## Module Tour
//!
//! ### 1. The Core ([`offer_actor`], [`model`])
//! - **Role**: owns the active and retired offers and applies commands.
//! - **Key items**: [`Offer`](model::Offer), [`OfferStoreActor`](offer_actor::OfferStoreActor),
//!   [`OfferSnapshot`](offer_actor::OfferSnapshot).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: hides the command queue behind async methods.
//! - **Key items**: [`OfferClient`](clients::OfferClient).
//!
//! ### 3. The Producers ([`rotation`], [`web`])
//! - **Role**: the timer that rotates offers and the HTTP routes that serve them.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: starts everything, and stops it in order on Ctrl+C / SIGTERM.
//! - **Key items**: [`OfferServer`](lifecycle::OfferServer), [`ServiceConfig`](config::ServiceConfig).
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --port 3000
//! curl localhost:3000/request
//! curl localhost:3000/admin/requests
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod offer_actor;
pub mod rotation;
pub mod web;
