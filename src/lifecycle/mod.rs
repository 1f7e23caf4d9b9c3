//! # System Lifecycle
//!
//! Starting, wiring and stopping the pieces of the service.
//!
//! - [`OfferSystem`] spawns the offer store actor and the rotation trigger and owns their
//!   task handles.
//! - [`OfferServer`] puts the HTTP façade in front of an `OfferSystem` and runs the
//!   ordered shutdown.
//! - [`shutdown_signal`] waits for Ctrl+C / SIGTERM.
//! - [`setup_tracing`] initializes logging for the binary.
//!
//! ## Shutdown Order
//!
//! 1. **Rotation** stops first, so no new `SetAt` commands appear.
//! 2. **HTTP** stops accepting connections and drains in-flight requests within the
//!    grace period (5 seconds by default). Overrunning it is logged, not fatal.
//! 3. **Store** receives `Stop`. Commands queued ahead of it are still applied.
//! 4. The store task is awaited before shutdown is reported complete.

pub mod offer_system;
pub mod server;
pub mod tracing;

pub use offer_system::*;
pub use server::*;
pub use self::tracing::setup_tracing;
