//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG` (default `info`).
//!
//! ## What Gets Traced
//!
//! - **Lifecycle**: server start, shutdown initiated/completed, store and rotation start/stop
//! - **Commands**: `GetAll`, `SetAt`, `IncrementAt`, retirements (at `debug`)
//! - **Client calls**: one span per [`OfferClient`](crate::clients::OfferClient) method
//! - **Rejected commands**: out-of-range indexes, at `warn`
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run -- --offers 5 --rotation-interval-ms 1000
//! RUST_LOG=offer_rotator::offer_actor=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a served request looks like:
//!
//! ```text
//! DEBUG increment_at{index=17}: Sending request
//! DEBUG IncrementAt index=17 views=3
//! DEBUG Served offer index=17 views=3
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
